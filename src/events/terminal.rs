use crate::config::{HotkeyAction, ViewHotkeys};
use crate::error::AppResult;
use crate::state::{State, View};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{io, sync::mpsc, thread, time::Duration};
use tui_textarea::CursorMove;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread. The
    /// thread stops once the handler is dropped or the terminal fails.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> AppResult<bool> {
        let event = self
            .rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::BrokenPipe, e))?;
        match event {
            Event::Input(event) => Ok(handle_key_event(state, event)),
            Event::Tick => Ok(true),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply a key event to the state. Returns false if exit was requested.
///
pub fn handle_key_event(state: &mut State, event: KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return true;
    }
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = event
    {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }

    if state.has_delete_confirmation() {
        handle_delete_confirmation(state, &event);
        return true;
    }

    let view = *state.current_view();
    let action = ViewHotkeys::action_for(state.get_hotkeys().for_view(&view), &event);
    match view {
        View::Login => handle_login(state, action, &event),
        View::TaskList => handle_task_list(state, action),
        View::TaskForm => {
            handle_task_form(state, action, &event);
            true
        }
        View::TaskDetail => handle_task_detail(state, action),
    }
}

/// Return the character typed by a key event, ignoring shifted letters'
/// modifier.
///
fn typed_char(event: &KeyEvent) -> Option<char> {
    match event {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => Some(*c),
        _ => None,
    }
}

fn handle_delete_confirmation(state: &mut State, event: &KeyEvent) {
    match ViewHotkeys::action_for(&state.get_hotkeys().delete_confirmation, event) {
        Some(HotkeyAction::DeleteConfirm) => {
            debug!("Processing delete confirmation event '{:?}'...", event);
            state.confirm_delete();
        }
        Some(HotkeyAction::Cancel) => {
            debug!("Processing delete cancellation event '{:?}'...", event);
            state.cancel_delete();
        }
        _ => {}
    }
}

fn handle_login(state: &mut State, action: Option<HotkeyAction>, event: &KeyEvent) -> bool {
    match action {
        Some(HotkeyAction::Quit) => return false,
        Some(HotkeyAction::SubmitLogin) => {
            // Failures are shown on the login form
            let _ = state.submit_login();
        }
        Some(HotkeyAction::SwitchLoginField) => {
            state.switch_login_field();
        }
        _ => {
            if event.code == KeyCode::Backspace {
                state.login_backspace();
            } else if let Some(c) = typed_char(event) {
                state.login_push_char(c);
            }
        }
    }
    true
}

fn handle_task_list(state: &mut State, action: Option<HotkeyAction>) -> bool {
    let Some(action) = action else {
        return true;
    };
    debug!("Processing task list action {:?}...", action);
    let result = match action {
        HotkeyAction::Quit => return false,
        HotkeyAction::NavigateNext => {
            state.next_task();
            Ok(())
        }
        HotkeyAction::NavigatePrev => {
            state.previous_task();
            Ok(())
        }
        HotkeyAction::ToggleStatus => state.toggle_selected_status().map(|_| ()),
        HotkeyAction::ViewTask => state.open_detail_selected().map(|_| ()),
        HotkeyAction::CreateTask => state.open_create_form().map(|_| ()),
        HotkeyAction::EditTask => state.open_edit_selected().map(|_| ()),
        HotkeyAction::DeleteTask => state.request_delete_selected().map(|_| ()),
        HotkeyAction::CycleStatusFilter => {
            state.cycle_status_filter();
            Ok(())
        }
        HotkeyAction::CyclePriorityFilter => {
            state.cycle_priority_filter();
            Ok(())
        }
        HotkeyAction::ToggleDarkMode => {
            state.toggle_dark_mode();
            Ok(())
        }
        _ => Ok(()),
    };
    if let Err(e) = result {
        debug!("Ignoring {:?}: {}", action, e);
    }
    true
}

fn handle_task_form(state: &mut State, action: Option<HotkeyAction>, event: &KeyEvent) {
    match action {
        Some(HotkeyAction::SubmitForm) => {
            // Validation errors are shown next to their fields
            let _ = state.submit_form();
        }
        Some(HotkeyAction::Cancel) => {
            state.cancel_form();
        }
        Some(HotkeyAction::NextField) => {
            state.next_form_field();
        }
        Some(HotkeyAction::PrevField) => {
            state.previous_form_field();
        }
        Some(HotkeyAction::NextOption) => {
            state.step_form_option(true);
        }
        Some(HotkeyAction::PrevOption) => {
            state.step_form_option(false);
        }
        _ => match event.code {
            KeyCode::Enter => {
                state.form_enter();
            }
            KeyCode::Up => {
                state.move_description_cursor(CursorMove::Up);
            }
            KeyCode::Down => {
                state.move_description_cursor(CursorMove::Down);
            }
            KeyCode::Backspace => {
                state.form_backspace();
            }
            _ => {
                if let Some(c) = typed_char(event) {
                    state.form_push_char(c);
                }
            }
        },
    }
}

fn handle_task_detail(state: &mut State, action: Option<HotkeyAction>) -> bool {
    let Some(action) = action else {
        return true;
    };
    let result = match action {
        HotkeyAction::Quit => return false,
        HotkeyAction::Back => {
            state.close_detail();
            Ok(())
        }
        HotkeyAction::EditTask => state.open_edit_detail().map(|_| ()),
        HotkeyAction::ToggleStatus => state.toggle_detail_status().map(|_| ()),
        HotkeyAction::DeleteTask => state.request_delete_detail().map(|_| ()),
        _ => Ok(()),
    };
    if let Err(e) = result {
        debug!("Ignoring {:?}: {}", action, e);
    }
    true
}
