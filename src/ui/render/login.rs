use super::Frame;
use crate::auth::LoginField;
use crate::state::State;
use crate::ui::widgets::{centered_rect, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the login form.
///
pub fn login(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let form = state.get_login_form();
    let area = centered_rect(50, 60, size);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Login ", styling::active_block_title_style(theme)))
        .border_style(styling::active_block_border_style(theme))
        .style(styling::surface_style(theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let masked: String = "*".repeat(form.password.chars().count());
    let inputs = [
        ("Username", form.username.as_str(), LoginField::Username),
        ("Password", masked.as_str(), LoginField::Password),
    ];
    for (row, (label, value, field)) in rows.iter().zip(inputs) {
        let focused = form.focus() == field;
        let border_style = if focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        };
        let cursor = if focused { "_" } else { "" };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(value.to_string(), styling::normal_text_style(theme)),
            Span::styled(cursor, styling::muted_text_style(theme)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(border_style),
        );
        frame.render_widget(input, *row);
    }

    if let Some(error) = form.error() {
        let message = Paragraph::new(Span::styled(
            error.to_string(),
            styling::error_text_style(theme),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(message, rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::super::all::tests::render_to_string;
    use crate::events::terminal::handle_key_event;
    use crate::state::State;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(state: &mut State, code: KeyCode) {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_password_is_masked() {
        let mut state = State::default();
        press(&mut state, KeyCode::Tab);
        for c in "secret".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        let screen = render_to_string(&mut state);
        assert!(!screen.contains("secret"));
        assert!(screen.contains("******"));
    }

    #[test]
    fn test_login_error_is_shown() {
        let mut state = State::default();
        press(&mut state, KeyCode::Enter);
        let screen = render_to_string(&mut state);
        assert!(screen.contains("username and password required"));
    }
}
