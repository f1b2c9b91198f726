use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render header with task counts and the dark mode indicator.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(" Tasks ", styling::active_block_title_style(theme)));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let (pending, completed) = state.get_tasks().counts();
    let counts = Line::from(vec![
        Span::styled(format!("{} pending", pending), styling::normal_text_style(theme)),
        Span::styled(", ", styling::muted_text_style(theme)),
        Span::styled(
            format!("{} completed", completed),
            styling::muted_text_style(theme),
        ),
    ]);
    frame.render_widget(Paragraph::new(counts), columns[0]);

    let mode = if state.get_preferences().dark_mode() {
        "Dark mode: on"
    } else {
        "Dark mode: off"
    };
    let mode_widget = Paragraph::new(Span::styled(mode, styling::muted_text_style(theme)))
        .alignment(Alignment::Right);
    frame.render_widget(mode_widget, columns[1]);
}
