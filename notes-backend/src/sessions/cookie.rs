use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};

use super::SessionStore;

pub const SESSION_COOKIE: &str = "notes_session";

/// The session a request belongs to, resolved from its cookie.
///
/// When the request had no usable cookie a new token is picked and
/// `issue_cookie` is set. The cookie is only sent once the store actually
/// holds state for that token.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: String,
    pub issue_cookie: bool,
}

impl SessionContext {
    pub fn resolve(store: &SessionStore, req: &HttpRequest) -> Self {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            let token = cookie.value();
            if store.touch(token) {
                return Self {
                    token: token.to_string(),
                    issue_cookie: false,
                };
            }
        }

        Self {
            token: SessionStore::new_token(),
            issue_cookie: true,
        }
    }

    /// Switch to a rotated token; the new one always has to be sent
    pub fn rotate(&mut self, store: &SessionStore) {
        self.token = store.rotate(&self.token);
        self.issue_cookie = true;
    }

    /// Attach the session cookie to a response if the browser does not have it
    /// yet and there is stored state worth keeping
    pub fn apply(&self, builder: &mut HttpResponseBuilder, store: &SessionStore, secure: bool) {
        if self.issue_cookie && store.contains(&self.token) {
            builder.cookie(session_cookie(&self.token, store, secure));
        }
    }
}

fn session_cookie(token: &str, store: &SessionStore, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(store.ttl().num_seconds()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Duration;

    #[test]
    fn test_request_without_cookie_gets_new_token() {
        let store = SessionStore::new(Duration::hours(1));
        let req = TestRequest::default().to_http_request();

        let ctx = SessionContext::resolve(&store, &req);
        assert!(ctx.issue_cookie);
        assert!(!ctx.token.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_cookie_only_sent_for_stored_sessions() {
        let store = SessionStore::new(Duration::hours(1));
        let req = TestRequest::default().to_http_request();
        let ctx = SessionContext::resolve(&store, &req);

        let mut builder = actix_web::HttpResponse::Ok();
        ctx.apply(&mut builder, &store, false);
        assert_eq!(builder.finish().cookies().count(), 0);

        store.push_flash(&ctx.token, crate::models::Flash::info("hello"));
        let mut builder = actix_web::HttpResponse::Ok();
        ctx.apply(&mut builder, &store, false);
        assert_eq!(builder.finish().cookies().count(), 1);
    }

    #[test]
    fn test_known_cookie_is_reused() {
        let store = SessionStore::new(Duration::hours(1));
        let token = store.create();
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .to_http_request();

        let ctx = SessionContext::resolve(&store, &req);
        assert!(!ctx.issue_cookie);
        assert_eq!(ctx.token, token);
    }

    #[test]
    fn test_unknown_cookie_is_replaced() {
        let store = SessionStore::new(Duration::hours(1));
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "forged"))
            .to_http_request();

        let ctx = SessionContext::resolve(&store, &req);
        assert!(ctx.issue_cookie);
        assert_ne!(ctx.token, "forged");
    }

    #[test]
    fn test_cookie_attributes() {
        let store = SessionStore::new(Duration::hours(2));
        let cookie = session_cookie("abc", &store, true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
    }
}
