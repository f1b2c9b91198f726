use super::{footer, header, log, login, main, Frame};
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

const HEADER_HEIGHT: u16 = 3;
const LOG_HEIGHT: u16 = 6;
const FOOTER_HEIGHT: u16 = 1;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let background = Block::default().style(styling::surface_style(state.get_theme()));
    frame.render_widget(background, size);

    if *state.current_view() == View::Login {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
            .split(size);
        login(frame, rows[0], state);
        footer(frame, rows[1], state);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    header(frame, rows[0], state);
    main(frame, rows[1], state);
    log(frame, rows[2], state);
    footer(frame, rows[3], state);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    /// Render the state into an in-memory terminal and return its text.
    ///
    pub fn render_to_string(state: &mut State) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| all(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    pub fn logged_in() -> State {
        use crate::events::terminal::handle_key_event;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut state = State::default();
        let keys = "prueba\tprueba\n";
        for c in keys.chars() {
            let code = match c {
                '\t' => KeyCode::Tab,
                '\n' => KeyCode::Enter,
                c => KeyCode::Char(c),
            };
            handle_key_event(&mut state, KeyEvent::new(code, KeyModifiers::NONE));
        }
        state
    }

    #[test]
    fn test_login_screen_renders() {
        let mut state = State::default();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("Login"));
        assert!(screen.contains("Username"));
    }

    #[test]
    fn test_task_list_renders_tasks_and_log() {
        let mut state = logged_in();
        let screen = render_to_string(&mut state);
        assert!(screen.contains("Example task 1"));
        assert!(screen.contains("Example task 3"));
        assert!(screen.contains("Log"));
        assert_eq!(state.get_terminal_size().width, 100);
    }
}
