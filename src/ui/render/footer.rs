use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::state::{State, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Format hotkeys for the current view as a display string.
///
fn format_hotkeys_for_view(view: &View, state: &State) -> String {
    let hotkeys = state.get_hotkeys();
    let view_hotkeys = hotkeys.for_view(view);

    match view {
        View::Login => build_footer_text(
            view_hotkeys,
            &[
                (HotkeyAction::SwitchLoginField, "switch field", None),
                (HotkeyAction::SubmitLogin, "log in", None),
                (HotkeyAction::Quit, "quit", None),
            ],
        ),
        View::TaskList => build_footer_text(
            view_hotkeys,
            &[
                (
                    HotkeyAction::NavigateNext,
                    "navigate",
                    Some(HotkeyAction::NavigatePrev),
                ),
                (HotkeyAction::ToggleStatus, "toggle", None),
                (HotkeyAction::ViewTask, "view", None),
                (HotkeyAction::CreateTask, "new", None),
                (HotkeyAction::EditTask, "edit", None),
                (HotkeyAction::DeleteTask, "delete", None),
                (HotkeyAction::CycleStatusFilter, "status filter", None),
                (HotkeyAction::CyclePriorityFilter, "priority filter", None),
                (HotkeyAction::ToggleDarkMode, "dark mode", None),
                (HotkeyAction::Quit, "quit", None),
            ],
        ),
        View::TaskForm => build_footer_text(
            view_hotkeys,
            &[
                (
                    HotkeyAction::NextField,
                    "fields",
                    Some(HotkeyAction::PrevField),
                ),
                (
                    HotkeyAction::PrevOption,
                    "change",
                    Some(HotkeyAction::NextOption),
                ),
                (HotkeyAction::SubmitForm, "save", None),
                (HotkeyAction::Cancel, "cancel", None),
            ],
        ),
        View::TaskDetail => build_footer_text(
            view_hotkeys,
            &[
                (HotkeyAction::EditTask, "edit", None),
                (HotkeyAction::ToggleStatus, "toggle", None),
                (HotkeyAction::DeleteTask, "delete", None),
                (HotkeyAction::Back, "back", None),
                (HotkeyAction::Quit, "quit", None),
            ],
        ),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let hotkeys = state.get_hotkeys();
    let theme = state.get_theme();

    let (mode, mode_color, controls_text) = if state.has_delete_confirmation() {
        (
            "DELETE:",
            theme.footer_delete,
            build_footer_text(
                &hotkeys.delete_confirmation,
                &[
                    (HotkeyAction::DeleteConfirm, "confirm delete", None),
                    (HotkeyAction::Cancel, "cancel", None),
                ],
            ),
        )
    } else if *state.current_view() == View::TaskForm {
        (
            "EDIT:",
            theme.footer_edit,
            format_hotkeys_for_view(state.current_view(), state),
        )
    } else {
        (
            "NORMAL:",
            theme.footer_normal,
            format_hotkeys_for_view(state.current_view(), state),
        )
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            controls_text,
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.primary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_text_per_view() {
        let state = State::default();
        let login = format_hotkeys_for_view(&View::Login, &state);
        assert!(login.contains("Tab: switch field"));
        assert!(login.contains("Enter: log in"));

        let list = format_hotkeys_for_view(&View::TaskList, &state);
        assert!(list.contains("j/k: navigate"));
        assert!(list.contains("m: dark mode"));

        let form = format_hotkeys_for_view(&View::TaskForm, &state);
        assert!(form.contains("Ctrl+S: save"));
        assert!(!form.contains("Status"));
    }
}
