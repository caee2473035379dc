//! Browser session cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::SessionId;
use tracing::debug;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "weatherdash_session";

/// The session id from `jar`, issuing a fresh cookie when none is valid
pub fn ensure_session(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()).ok())
    {
        return (jar, id);
    }

    let id = SessionId::new();
    debug!(session = %id, "Issued new session");
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_cookie_when_missing() {
        let (jar, id) = ensure_session(CookieJar::new());

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn reuses_valid_cookie() {
        let existing = SessionId::new();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, existing.to_string()));

        let (_, id) = ensure_session(jar);

        assert_eq!(id, existing);
    }

    #[test]
    fn replaces_garbage_cookie() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "not-a-uuid"));

        let (jar, id) = ensure_session(jar);

        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), id.to_string());
    }
}
