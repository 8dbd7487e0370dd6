use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::response::AppendHeaders;
use http::header::{self, HeaderName};
use http::request::Parts;
use uuid::Uuid;

use crate::cache::ArticleCache;
use crate::http::routes::AppState;
use crate::navigation::Navigation;
use crate::store::KvStore;

pub const SESSION_COOKIE: &str = "ts_session";

/// The visitor's session, found through the `ts_session` cookie or started
/// fresh when the cookie is missing or unreadable.
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    store: Arc<dyn KvStore>,
    fresh: bool,
}

impl Session {
    pub fn cache(&self) -> ArticleCache {
        ArticleCache::new(Arc::clone(&self.store))
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::new(Arc::clone(&self.store))
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// `Set-Cookie` for sessions started by this request, nothing otherwise.
    /// No `Max-Age`, so the browser drops it when it closes.
    pub fn cookie(&self) -> AppendHeaders<Option<(HeaderName, String)>> {
        AppendHeaders(self.fresh.then(|| {
            (
                header::SET_COOKIE,
                format!("{SESSION_COOKIE}={}; HttpOnly; SameSite=Lax; Path=/", self.id),
            )
        }))
    }
}

/// Session id from one `Cookie` header value.
pub fn session_from_cookie(raw: &str) -> Option<Uuid> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_from_cookie);

        let (id, fresh) = match existing {
            Some(id) => (id, false),
            None => (Uuid::new_v4(), true),
        };
        let store = state.sessions.handle(id);

        Ok(Self { id, store, fresh })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_cookie() {
        let id = Uuid::new_v4();
        assert_eq!(
            session_from_cookie(&format!("theme=dark; {SESSION_COOKIE}={id}")),
            Some(id)
        );
        assert_eq!(session_from_cookie("theme=dark"), None);
        assert_eq!(session_from_cookie(&format!("{SESSION_COOKIE}=not-a-uuid")), None);
    }
}
