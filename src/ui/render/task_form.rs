use super::Frame;
use crate::state::{validation_field, FormField, State};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the create/edit task form.
///
pub fn task_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let editing = state.is_editing();
    let focus = state.get_form().focus();

    let title = if editing { " Edit Task " } else { " New Task " };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style(&theme)))
        .border_style(styling::active_block_border_style(&theme));
    let inner = outer.inner(size);
    frame.render_widget(outer, size);

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ];
    if editing {
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(1));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let title_value = state.form_field_value(FormField::Title);
    render_text_field(frame, rows[0], &theme, "Title", &title_value, focus == FormField::Title);
    render_error(frame, rows[1], &theme, state, FormField::Title);

    render_description(frame, rows[2], &theme, state, focus == FormField::Description);
    render_error(frame, rows[3], &theme, state, FormField::Description);

    let priority_value = state.form_field_value(FormField::Priority);
    render_option_field(
        frame,
        rows[4],
        &theme,
        "Priority",
        &priority_value,
        focus == FormField::Priority,
    );
    render_error(frame, rows[5], &theme, state, FormField::Priority);

    if editing {
        let status_value = state.form_field_value(FormField::Status);
        render_option_field(
            frame,
            rows[6],
            &theme,
            "Status",
            &status_value,
            focus == FormField::Status,
        );
        render_error(frame, rows[7], &theme, state, FormField::Status);
    }
}

fn field_block(theme: &Theme, label: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(border_style)
}

fn render_text_field(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    focused: bool,
) {
    let cursor = if focused { "_" } else { "" };
    let line = Line::from(vec![
        Span::styled(value.to_string(), styling::normal_text_style(theme)),
        Span::styled(cursor, styling::muted_text_style(theme)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(field_block(theme, label, focused)),
        size,
    );
}

fn render_option_field(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    focused: bool,
) {
    let mut spans = vec![Span::styled(
        value.to_string(),
        styling::normal_text_style(theme),
    )];
    if focused {
        spans.push(Span::styled("   ←/→ change", styling::muted_text_style(theme)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(field_block(theme, label, focused)),
        size,
    );
}

fn render_description(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    state: &mut State,
    focused: bool,
) {
    let block = field_block(theme, "Description", focused);
    let cursor_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let editor = state.get_form_mut().description_editor();
    editor.set_block(block);
    editor.set_style(styling::normal_text_style(theme));
    editor.set_cursor_style(cursor_style);
    editor.set_cursor_line_style(Style::default());
    frame.render_widget(state.get_form().description().widget(), size);
}

fn render_error(frame: &mut Frame, size: Rect, theme: &Theme, state: &State, field: FormField) {
    if let Some(error) = state.get_form().errors().for_field(validation_field(field)) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", error),
                styling::error_text_style(theme),
            )),
            size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::all::tests::{logged_in, render_to_string};

    #[test]
    fn test_create_form_has_no_status_field() {
        let mut state = logged_in();
        state.open_create_form().unwrap();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("New Task"));
        assert!(screen.contains("Medium"));
        assert!(!screen.contains("Status"));
    }

    #[test]
    fn test_edit_form_shows_values_and_errors() {
        let mut state = logged_in();
        state.open_edit_form("2").unwrap();
        for _ in 0.."Example task 2".len() {
            state.form_backspace();
        }
        let _ = state.submit_form();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("Edit Task"));
        assert!(screen.contains("title required"));
        assert!(screen.contains("Description of task 2"));
        assert!(screen.contains("Completed"));
    }
}
