//! Login gate for protected routes.
//!
//! `authorize` is the pure decision; `require_login` / `require_login_json`
//! are the guards handlers call first, returning the response to send when
//! access is denied.

use actix_web::HttpResponse;

use crate::controllers::redirect;
use crate::models::{Flash, Session};
use crate::sessions::SessionContext;
use crate::AppState;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

pub fn authorize(session: &Session) -> Access {
    if session.logged_in {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Guard for HTML routes: denied requests are redirected to the login page
/// with a danger notice queued.
pub fn require_login(state: &AppState, ctx: &SessionContext) -> Result<Session, HttpResponse> {
    let session = state.sessions.get(&ctx.token);
    match authorize(&session) {
        Access::Allow => Ok(session),
        Access::Deny => {
            state
                .sessions
                .push_flash(&ctx.token, Flash::danger(LOGIN_REQUIRED_MESSAGE));
            Err(redirect(state, ctx, "/login"))
        }
    }
}

/// Guard for JSON routes: denied requests get a 401 body instead of a redirect
pub fn require_login_json(state: &AppState, ctx: &SessionContext) -> Result<Session, HttpResponse> {
    let session = state.sessions.get(&ctx.token);
    match authorize(&session) {
        Access::Allow => Ok(session),
        Access::Deny => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Not logged in"
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, Credential};

    #[test]
    fn test_anonymous_is_denied() {
        assert_eq!(authorize(&Session::anonymous()), Access::Deny);
    }

    #[test]
    fn test_allowed_after_login() {
        let auth = Authenticator::new(Credential::from_plaintext("izuko", "izuko12345").unwrap());
        let mut session = Session::anonymous();
        assert_eq!(authorize(&session), Access::Deny);

        auth.login(&mut session, "izuko", "izuko12345").unwrap();
        assert_eq!(authorize(&session), Access::Allow);

        Authenticator::logout(&mut session);
        assert_eq!(authorize(&session), Access::Deny);
    }

    #[test]
    fn test_authorize_does_not_mutate() {
        let session = Session {
            logged_in: true,
            username: Some("izuko".to_string()),
        };
        let before = session.clone();
        authorize(&session);
        assert_eq!(session, before);
    }
}
