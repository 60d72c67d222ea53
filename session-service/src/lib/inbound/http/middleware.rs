use std::sync::Arc;

use auth::Claims;
use auth::TokenError;
use auth::TokenService;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;

use super::cookies;
use super::handlers::found;
use super::handlers::ApiError;
use crate::config::SessionConfig;

/// Identity attached to requests carrying a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub claims: Claims,
}

/// Request extension describing the session outcome for the wrapped handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(AuthenticatedUser),
    /// No usable session. `rejection` keeps the token error for logging only.
    Anonymous { rejection: TokenError },
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous { .. } => None,
        }
    }
}

/// Middleware state: token service, cookie settings and the optional redirect
/// target for requests without a valid session.
#[derive(Clone)]
pub struct SessionGuard {
    tokens: Arc<TokenService>,
    settings: Arc<SessionConfig>,
    redirect_to: Option<String>,
}

impl SessionGuard {
    /// Guard that lets unauthenticated requests through without an identity.
    pub fn new(tokens: Arc<TokenService>, settings: Arc<SessionConfig>) -> Self {
        Self {
            tokens,
            settings,
            redirect_to: None,
        }
    }

    /// Guard that answers unauthenticated requests with `302 Found` to `target`.
    pub fn redirecting_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    /// Verify the session cookie and re-issue it with the full TTL.
    ///
    /// # Returns
    /// The identity and the renewed session cookie
    fn renew(&self, jar: &CookieJar) -> Result<(AuthenticatedUser, Cookie<'static>), TokenError> {
        let token = cookies::session_token(jar, &self.settings.cookie_name)?;
        let (claims, refreshed) = self.tokens.refresh(token, self.settings.ttl_seconds)?;
        let email = claims
            .email()
            .ok_or_else(|| TokenError::MissingClaim(auth::token::claims::EMAIL.to_string()))?
            .to_string();

        let cookie = cookies::session_cookie(
            &self.settings.cookie_name,
            refreshed,
            self.settings.ttl_seconds,
        );
        Ok((AuthenticatedUser { email, claims }, cookie))
    }
}

/// Failures of re-issuing a verified token. These are server faults, not a
/// rejected session.
fn is_issuance_failure(error: &TokenError) -> bool {
    matches!(
        error,
        TokenError::InvalidTtl(_) | TokenError::SerializationError(_)
    )
}

/// Middleware that validates the session cookie and renews it.
///
/// A valid session is re-issued with the full TTL (sliding expiration) and the
/// identity is attached as [`SessionState::Authenticated`]. A rejected token
/// clears the cookie, then either redirects or runs the handler anonymously.
/// If re-issuing fails the request ends with `500` and no cookie is written.
pub async fn authenticate(
    State(guard): State<SessionGuard>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match guard.renew(&jar) {
        Ok((user, renewed)) => {
            tracing::debug!(email = %user.email, uri = %req.uri(), "Session renewed");
            req.extensions_mut().insert(SessionState::Authenticated(user));

            (cookies::set_cookie(renewed), next.run(req).await).into_response()
        }
        Err(e) if is_issuance_failure(&e) => {
            tracing::error!(error = %e, uri = %req.uri(), "Failed to renew session token");
            ApiError::InternalServerError("Failed to renew session".to_string()).into_response()
        }
        Err(rejection) => {
            match &rejection {
                TokenError::MissingCookie => tracing::debug!(uri = %req.uri(), "No session cookie"),
                e => tracing::warn!(error = %e, uri = %req.uri(), "Session token rejected"),
            }

            let cleared = cookies::set_cookie(cookies::cleared_cookie(&guard.settings.cookie_name));
            if let Some(target) = &guard.redirect_to {
                return (cleared, found(target)).into_response();
            }

            req.extensions_mut()
                .insert(SessionState::Anonymous { rejection });
            (cleared, next.run(req).await).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_issuance_errors_are_server_faults() {
        assert!(is_issuance_failure(&TokenError::InvalidTtl(i64::MAX)));
        assert!(is_issuance_failure(&TokenError::SerializationError("x".to_string())));

        assert!(!is_issuance_failure(&TokenError::MissingCookie));
        assert!(!is_issuance_failure(&TokenError::InvalidSignature));
        assert!(!is_issuance_failure(&TokenError::ExpiredToken));
        assert!(!is_issuance_failure(&TokenError::MissingClaim("email".to_string())));
    }
}
