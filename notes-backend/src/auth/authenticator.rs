use super::Credential;
use crate::error::AuthError;
use crate::models::Session;

/// Checks credentials and moves sessions between anonymous and logged in
#[derive(Debug, Clone)]
pub struct Authenticator {
    credential: Credential,
}

impl Authenticator {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn username(&self) -> &str {
        self.credential.username()
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.credential.matches(username, password)
    }

    /// Log the session in. On failure the session is left untouched.
    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<(), AuthError> {
        if !self.verify(username, password) {
            log::warn!("[AUTH] Failed login attempt for {:?}", username);
            return Err(AuthError::InvalidCredentials);
        }

        session.logged_in = true;
        session.username = Some(username.to_string());
        log::info!("[AUTH] {} logged in", username);
        Ok(())
    }

    /// Clear the login state; a no-op for sessions that are already anonymous
    pub fn logout(session: &mut Session) {
        if let Some(username) = session.username.take() {
            log::info!("[AUTH] {} logged out", username);
        }
        session.logged_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_authenticator() -> Authenticator {
        Authenticator::new(Credential::from_plaintext("izuko", "izuko12345").unwrap())
    }

    #[test]
    fn test_verify() {
        let auth = default_authenticator();
        assert!(auth.verify("izuko", "izuko12345"));
        assert!(!auth.verify("izuko", "wrong"));
        assert!(!auth.verify("other", "izuko12345"));
        assert!(!auth.verify("", ""));
        assert!(!auth.verify("IZUKO", "izuko12345"));
    }

    #[test]
    fn test_login_success() {
        let auth = default_authenticator();
        let mut session = Session::anonymous();

        auth.login(&mut session, "izuko", "izuko12345").unwrap();
        assert!(session.logged_in);
        assert_eq!(session.username.as_deref(), Some("izuko"));
        assert_eq!(session.current_user(), Some("izuko"));
    }

    #[test]
    fn test_login_failure_leaves_session_unchanged() {
        let auth = default_authenticator();

        let mut anonymous = Session::anonymous();
        for _ in 0..3 {
            let result = auth.login(&mut anonymous, "izuko", "wrong");
            assert_eq!(result, Err(AuthError::InvalidCredentials));
            assert_eq!(anonymous, Session::anonymous());
        }

        let mut logged_in = Session::anonymous();
        auth.login(&mut logged_in, "izuko", "izuko12345").unwrap();
        let before = logged_in.clone();
        assert!(auth.login(&mut logged_in, "other", "izuko12345").is_err());
        assert_eq!(logged_in, before);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let auth = default_authenticator();
        let mut session = Session::anonymous();
        auth.login(&mut session, "izuko", "izuko12345").unwrap();

        Authenticator::logout(&mut session);
        assert_eq!(session, Session::anonymous());

        Authenticator::logout(&mut session);
        assert_eq!(session, Session::anonymous());
    }
}
