//! Login gate.
//!
//! Access is decided by an injected [`Authenticator`]; the default
//! implementation compares against a single configured credential pair.

use log::*;

/// Outcome of a credential check.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthDecision {
    Granted,
    Denied,
}

/// Capability deciding whether a username/password pair grants access.
///
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> AuthDecision;
}

/// Accepts exactly one credential pair, compared verbatim.
///
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> AuthDecision {
        if username == self.username && password == self.password {
            AuthDecision::Granted
        } else {
            AuthDecision::Denied
        }
    }
}

/// Reasons a login attempt is refused.
///
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("username required")]
    UsernameRequired,

    #[error("password required")]
    PasswordRequired,

    #[error("username and password required")]
    BothRequired,

    #[error("incorrect username or password")]
    InvalidCredentials,
}

/// Which login input has focus.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Text inputs of the login screen.
///
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    focus: LoginField,
    error: Option<LoginError>,
}

impl LoginForm {
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn toggle_focus(&mut self) -> &mut Self {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
        self
    }

    pub fn error(&self) -> Option<&LoginError> {
        self.error.as_ref()
    }

    /// Append a character to the focused input, clearing any shown error.
    ///
    pub fn push_char(&mut self, c: char) -> &mut Self {
        self.error = None;
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
        self
    }

    /// Check the inputs and ask the authenticator. Blank inputs are reported
    /// before any credential check takes place.
    ///
    pub fn submit(&mut self, authenticator: &dyn Authenticator) -> Result<(), LoginError> {
        let result = match (
            self.username.trim().is_empty(),
            self.password.trim().is_empty(),
        ) {
            (true, true) => Err(LoginError::BothRequired),
            (true, false) => Err(LoginError::UsernameRequired),
            (false, true) => Err(LoginError::PasswordRequired),
            (false, false) => match authenticator.authenticate(&self.username, &self.password) {
                AuthDecision::Granted => Ok(()),
                AuthDecision::Denied => Err(LoginError::InvalidCredentials),
            },
        };

        match &result {
            Ok(()) => {
                info!("Login granted for '{}'.", self.username);
                self.password.clear();
                self.error = None;
            }
            Err(e) => {
                warn!("Login refused: {}", e);
                if *e == LoginError::InvalidCredentials {
                    self.password.clear();
                    self.focus = LoginField::Password;
                }
                self.error = Some(e.clone());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDeny;

    impl Authenticator for AlwaysDeny {
        fn authenticate(&self, _username: &str, _password: &str) -> AuthDecision {
            AuthDecision::Denied
        }
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn static_credentials_require_exact_match() {
        let credentials = StaticCredentials::new("prueba", "prueba");
        assert_eq!(credentials.authenticate("prueba", "prueba"), AuthDecision::Granted);
        assert_eq!(credentials.authenticate("Prueba", "prueba"), AuthDecision::Denied);
        assert_eq!(credentials.authenticate("prueba ", "prueba"), AuthDecision::Denied);
        assert_eq!(credentials.authenticate("prueba", "wrong"), AuthDecision::Denied);
    }

    #[test]
    fn blank_fields_are_reported_before_checking() {
        let credentials = StaticCredentials::new("prueba", "prueba");
        assert_eq!(form("", "").submit(&credentials), Err(LoginError::BothRequired));
        assert_eq!(form("  ", "x").submit(&credentials), Err(LoginError::UsernameRequired));
        assert_eq!(form("x", "").submit(&credentials), Err(LoginError::PasswordRequired));
    }

    #[test]
    fn wrong_credentials_give_one_generic_message() {
        let mut login = form("someone", "secret");
        let error = login.submit(&StaticCredentials::new("prueba", "prueba")).unwrap_err();
        assert_eq!(error.to_string(), "incorrect username or password");
        assert_eq!(login.error(), Some(&LoginError::InvalidCredentials));
        assert!(login.password.is_empty());
        assert_eq!(login.focus(), LoginField::Password);
    }

    #[test]
    fn injected_authenticator_decides() {
        let mut login = form("prueba", "prueba");
        assert_eq!(login.submit(&AlwaysDeny), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn successful_login_clears_password() {
        let mut login = form("prueba", "prueba");
        assert!(login.submit(&StaticCredentials::new("prueba", "prueba")).is_ok());
        assert!(login.password.is_empty());
        assert!(login.error().is_none());
    }

    #[test]
    fn typing_goes_to_focused_field_and_clears_error() {
        let mut login = LoginForm::default();
        let _ = login.submit(&AlwaysDeny);
        assert!(login.error().is_some());
        login.push_char('a').push_char('b');
        assert!(login.error().is_none());
        login.toggle_focus().push_char('c');
        login.backspace().push_char('d');
        assert_eq!(login.username, "ab");
        assert_eq!(login.password, "d");
    }
}
