use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render task detail view (full screen).
///
pub fn task_detail(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let Some(task) = state.get_task_detail() else {
        let empty = Paragraph::new("No task selected.")
            .style(styling::muted_text_style(theme))
            .block(Block::default().borders(Borders::ALL).title("Task"));
        frame.render_widget(empty, size);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Properties
            Constraint::Min(3),    // Description
        ])
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        task.title.as_str(),
        styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Task Details ", styling::active_block_title_style(theme)))
            .border_style(styling::active_block_border_style(theme)),
    );
    frame.render_widget(title, chunks[0]);

    let status_color = if task.is_completed() {
        theme.success.to_color()
    } else {
        theme.text.to_color()
    };
    let properties = Text::from(vec![
        Line::from(vec![
            Span::styled("Priority: ", styling::muted_text_style(theme)),
            Span::styled(
                task.priority.label(),
                Style::default()
                    .fg(theme.priority_color(task.priority))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status:   ", styling::muted_text_style(theme)),
            Span::styled(task.status.label(), Style::default().fg(status_color)),
        ]),
    ]);
    let properties_widget = Paragraph::new(properties).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(properties_widget, chunks[1]);

    let description = Paragraph::new(Text::from(task.description.as_str()))
        .style(styling::normal_text_style(theme))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Description")
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(description, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::super::all::tests::{logged_in, render_to_string};

    #[test]
    fn test_detail_shows_task() {
        let mut state = logged_in();
        state.next_task();
        state.open_detail_selected().unwrap();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("Task Details"));
        assert!(screen.contains("Example task 2"));
        assert!(screen.contains("Description of task 2"));
        assert!(screen.contains("Priority: Medium"));
        assert!(screen.contains("Status:   Completed"));
    }
}
