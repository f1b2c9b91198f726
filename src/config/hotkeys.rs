//! Hotkey configuration management.
//!
//! This module defines the actions that can be bound to keys, the default
//! bindings per view and helpers to render them in the footer.

use crate::state::View;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    Quit,
    Back,

    // Login view actions
    SubmitLogin,
    SwitchLoginField,

    // TaskList view actions
    NavigateNext,
    NavigatePrev,
    ToggleStatus,
    ViewTask,
    CreateTask,
    EditTask,
    DeleteTask,
    CycleStatusFilter,
    CyclePriorityFilter,
    ToggleDarkMode,

    // TaskForm view actions
    NextField,
    PrevField,
    NextOption,
    PrevOption,
    SubmitForm,
    Cancel,

    // Delete confirmation modal
    DeleteConfirm,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Hotkey { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Hotkey::new(code, KeyModifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Hotkey::plain(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Hotkey::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Check whether a key event triggers this hotkey. Terminals disagree on
    /// whether BackTab carries SHIFT, so its modifiers are not compared.
    ///
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code == KeyCode::BackTab {
            return event.code == KeyCode::BackTab;
        }
        self.code == event.code && self.modifiers == event.modifiers
    }
}

/// Bindings of a single view.
///
pub type Bindings = HashMap<HotkeyAction, Vec<Hotkey>>;

/// Hotkey bindings for every view.
///
#[derive(Debug, Clone)]
pub struct ViewHotkeys {
    pub login: Bindings,
    pub task_list: Bindings,
    pub task_form: Bindings,
    pub task_detail: Bindings,
    pub delete_confirmation: Bindings,
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        ViewHotkeys {
            login: default_login_hotkeys(),
            task_list: default_task_list_hotkeys(),
            task_form: default_task_form_hotkeys(),
            task_detail: default_task_detail_hotkeys(),
            delete_confirmation: default_delete_confirmation_hotkeys(),
        }
    }
}

impl ViewHotkeys {
    /// Return the bindings of the given view.
    ///
    pub fn for_view(&self, view: &View) -> &Bindings {
        match view {
            View::Login => &self.login,
            View::TaskList => &self.task_list,
            View::TaskForm => &self.task_form,
            View::TaskDetail => &self.task_detail,
        }
    }

    /// Resolve a key event to the action bound in the given bindings.
    ///
    pub fn action_for(bindings: &Bindings, event: &KeyEvent) -> Option<HotkeyAction> {
        bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|key| key.matches(event)))
            .map(|(action, _)| *action)
    }
}

fn bindings(entries: Vec<(HotkeyAction, Vec<Hotkey>)>) -> Bindings {
    entries.into_iter().collect()
}

fn default_login_hotkeys() -> Bindings {
    bindings(vec![
        (HotkeyAction::SubmitLogin, vec![Hotkey::plain(KeyCode::Enter)]),
        (
            HotkeyAction::SwitchLoginField,
            vec![
                Hotkey::plain(KeyCode::Tab),
                Hotkey::new(KeyCode::BackTab, KeyModifiers::SHIFT),
                Hotkey::plain(KeyCode::Up),
                Hotkey::plain(KeyCode::Down),
            ],
        ),
        (HotkeyAction::Quit, vec![Hotkey::plain(KeyCode::Esc)]),
    ])
}

fn default_task_list_hotkeys() -> Bindings {
    bindings(vec![
        (
            HotkeyAction::NavigateNext,
            vec![Hotkey::char('j'), Hotkey::plain(KeyCode::Down)],
        ),
        (
            HotkeyAction::NavigatePrev,
            vec![Hotkey::char('k'), Hotkey::plain(KeyCode::Up)],
        ),
        (HotkeyAction::ToggleStatus, vec![Hotkey::char(' ')]),
        (HotkeyAction::ViewTask, vec![Hotkey::plain(KeyCode::Enter)]),
        (HotkeyAction::CreateTask, vec![Hotkey::char('n')]),
        (HotkeyAction::EditTask, vec![Hotkey::char('e')]),
        (HotkeyAction::DeleteTask, vec![Hotkey::char('d')]),
        (HotkeyAction::CycleStatusFilter, vec![Hotkey::char('s')]),
        (HotkeyAction::CyclePriorityFilter, vec![Hotkey::char('p')]),
        (HotkeyAction::ToggleDarkMode, vec![Hotkey::char('m')]),
        (HotkeyAction::Quit, vec![Hotkey::char('q')]),
    ])
}

fn default_task_form_hotkeys() -> Bindings {
    bindings(vec![
        (HotkeyAction::NextField, vec![Hotkey::plain(KeyCode::Tab)]),
        (
            HotkeyAction::PrevField,
            vec![Hotkey::new(KeyCode::BackTab, KeyModifiers::SHIFT)],
        ),
        (HotkeyAction::NextOption, vec![Hotkey::plain(KeyCode::Right)]),
        (HotkeyAction::PrevOption, vec![Hotkey::plain(KeyCode::Left)]),
        (HotkeyAction::SubmitForm, vec![Hotkey::ctrl('s')]),
        (HotkeyAction::Cancel, vec![Hotkey::plain(KeyCode::Esc)]),
    ])
}

fn default_task_detail_hotkeys() -> Bindings {
    bindings(vec![
        (HotkeyAction::EditTask, vec![Hotkey::char('e')]),
        (HotkeyAction::ToggleStatus, vec![Hotkey::char(' ')]),
        (HotkeyAction::DeleteTask, vec![Hotkey::char('d')]),
        (
            HotkeyAction::Back,
            vec![Hotkey::plain(KeyCode::Esc), Hotkey::plain(KeyCode::Backspace)],
        ),
        (HotkeyAction::Quit, vec![Hotkey::char('q')]),
    ])
}

fn default_delete_confirmation_hotkeys() -> Bindings {
    bindings(vec![
        (
            HotkeyAction::DeleteConfirm,
            vec![Hotkey::plain(KeyCode::Enter), Hotkey::char('y')],
        ),
        (
            HotkeyAction::Cancel,
            vec![Hotkey::plain(KeyCode::Esc), Hotkey::char('n')],
        ),
    ])
}

/// Build footer text from hotkey actions and descriptions.
/// Each entry is (action, description, optional paired action shown as "a/b").
///
pub fn build_footer_text(
    hotkeys: &Bindings,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let mut parts = Vec::new();

    for (action, description, paired_action) in actions {
        let Some(hotkey) = hotkeys.get(action).and_then(|keys| keys.first()) else {
            continue;
        };
        let paired = paired_action
            .as_ref()
            .and_then(|paired| hotkeys.get(paired))
            .and_then(|keys| keys.first());
        match paired {
            Some(paired_hotkey) => parts.push(format!(
                " {}/{}: {}",
                format_hotkey_display(hotkey),
                format_hotkey_display(paired_hotkey),
                description
            )),
            None => parts.push(format!(" {}: {}", format_hotkey_display(hotkey), description)),
        }
    }

    parts.join(" |")
}

/// Format a hotkey for display (e.g. "Ctrl+S", "Space", "Esc").
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if hotkey.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_ascii_uppercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        other => format!("{:?}", other),
    };
    parts.push(key_str);
    parts.join("+")
}
