//! Pinned development session
//!
//! There is no login. The server is started for one user and every request
//! acts as that user: [`pin_session`] puts a [`SessionUser`] into the
//! request extensions and keeps the browser's `userId` cookie in sync.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use super::error::ApiError;
use super::server::AppState;

/// Cookie carrying the session user id
pub const SESSION_COOKIE: &str = "userId";

/// The user a request acts as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(pub Uuid);

impl SessionUser {
    pub fn id(self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .copied()
            .ok_or_else(|| ApiError::Internal {
                message: "session middleware not installed".into(),
            })
    }
}

/// Pin the request to the server's session user.
///
/// When the incoming `userId` cookie is missing or names someone else, the
/// response resets it.
pub async fn pin_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.session;
    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    if presented == Some(session.id()) {
        return response;
    }

    tracing::debug!(user = %session.id(), "Resetting session cookie");
    (jar.add(session_cookie(session)), response).into_response()
}

fn session_cookie(session: SessionUser) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.id().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_attributes() {
        let id = Uuid::new_v4();
        let cookie = session_cookie(SessionUser(id));

        assert_eq!(cookie.name(), "userId");
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
