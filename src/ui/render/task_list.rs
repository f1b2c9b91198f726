use super::Frame;
use crate::state::State;
use crate::tasks::{Filter, Task};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub const EMPTY_MESSAGE: &str = "No tasks.";

/// Render the filter bar and the visible tasks.
///
pub fn task_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(size);

    frame.render_widget(filter_bar(state.get_tasks().filter(), &theme), rows[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Task List ", styling::active_block_title_style(&theme)))
        .border_style(styling::active_block_border_style(&theme));

    let items: Vec<ListItem> = state
        .visible_tasks()
        .into_iter()
        .map(|task| task_item(task, &theme))
        .collect();

    if items.is_empty() {
        let empty = Paragraph::new(Span::styled(EMPTY_MESSAGE, styling::muted_text_style(&theme)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::active_list_item_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, rows[1], state.get_list_state());
}

fn filter_bar(filter: &Filter, theme: &Theme) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled("Status: ", styling::muted_text_style(theme)),
        Span::styled(filter.status.to_string(), styling::normal_text_style(theme)),
        Span::styled("   Priority: ", styling::muted_text_style(theme)),
        Span::styled(filter.priority.to_string(), styling::normal_text_style(theme)),
    ]);
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filters")
            .border_style(styling::normal_block_border_style(theme)),
    )
}

fn task_item(task: &Task, theme: &Theme) -> ListItem<'static> {
    let checkbox = if task.is_completed() { "[x] " } else { "[ ] " };
    let mut title_style = styling::normal_text_style(theme);
    if task.is_completed() {
        title_style = title_style
            .fg(theme.text_muted.to_color())
            .add_modifier(Modifier::CROSSED_OUT);
    }
    ListItem::new(Line::from(vec![
        Span::styled(checkbox, styling::normal_text_style(theme)),
        Span::styled(
            "● ",
            Style::default().fg(theme.priority_color(task.priority)),
        ),
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!("  {} · {}", task.priority, task.status),
            styling::muted_text_style(theme),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::super::all::tests::{logged_in, render_to_string};
    use super::*;
    use crate::tasks::{PriorityFilter, StatusFilter};

    #[test]
    fn test_empty_list_message() {
        let mut state = logged_in();
        state.cycle_status_filter(); // Pending
        state.cycle_status_filter(); // Completed
        state.cycle_priority_filter(); // High
        let screen = render_to_string(&mut state);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains("Status: Completed"));
        assert!(screen.contains("Priority: High"));
    }

    #[test]
    fn test_completed_tasks_are_checked() {
        let mut state = logged_in();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("[x] "));
        assert!(screen.contains("Medium · Completed"));
        assert_eq!(state.get_tasks().filter().priority, PriorityFilter::All);
        assert_eq!(state.get_tasks().filter().status, StatusFilter::All);
    }
}
