use super::{task_detail, task_form, task_list, Frame};
use crate::state::{State, View};
use crate::ui::widgets::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MAX_TITLE_DISPLAY: usize = 45;

/// Render main widget according to state.
///
pub fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match *state.current_view() {
        View::Login | View::TaskList => task_list::task_list(frame, size, state),
        View::TaskForm => task_form::task_form(frame, size, state),
        View::TaskDetail => task_detail::task_detail(frame, size, state),
    }

    // Render delete confirmation on top of everything
    if state.has_delete_confirmation() {
        render_delete_confirmation(frame, size, state);
    }
}

fn render_delete_confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let task_title = state
        .get_delete_confirmation()
        .map(|task| task.title.clone())
        .unwrap_or_else(|| "this task".to_string());

    let popup_area = centered_rect(60, 40, size);
    frame.render_widget(Clear, popup_area);

    // Truncate on characters, titles are not ASCII-only
    let display_title = if task_title.chars().count() > MAX_TITLE_DISPLAY {
        let truncated: String = task_title.chars().take(MAX_TITLE_DISPLAY).collect();
        format!("{}...", truncated)
    } else {
        task_title
    };

    let theme = state.get_theme();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete task \"{}\"?", display_title),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Confirm Delete ",
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(theme.error.to_color()))
                .style(Style::default().bg(theme.surface.to_color())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}
