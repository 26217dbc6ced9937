use crate::errors::CoreError;

/// Authentication state of one signed-in user.
///
/// Holds the bearer token returned by login. Passed explicitly to every
/// authenticated call instead of being read from ambient storage.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("username", &self.username)
            .finish()
    }
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously issued token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_token(token, None);
        session
    }

    pub fn set_token(&mut self, token: impl Into<String>, username: Option<String>) {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self.username = username;
    }

    /// Forget the token (logout).
    pub fn clear(&mut self) {
        self.token = None;
        self.username = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The token, or `NotAuthenticated` when there is none.
    pub fn require_token(&self) -> Result<&str, CoreError> {
        self.token().ok_or(CoreError::NotAuthenticated)
    }
}
