use auth::TokenError;
use axum::http::header;
use axum::http::HeaderName;
use axum::response::AppendHeaders;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use time::Duration;

/// Session cookie carrying `token`: HttpOnly, `Path=/`, `Max-Age` = TTL.
pub fn session_cookie(name: &str, token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(ttl_seconds))
        .build()
}

/// Empty session cookie that expires immediately.
pub fn cleared_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Response part writing a single `Set-Cookie` header.
pub type SetCookie = AppendHeaders<[(HeaderName, String); 1]>;

/// `Set-Cookie` header carrying `cookie` verbatim.
///
/// The value is the token string itself, never percent-encoded. Do not add
/// session cookies through `CookieJar`: it writes `=` as `%3D`.
pub fn set_cookie(cookie: Cookie<'static>) -> SetCookie {
    AppendHeaders([(header::SET_COOKIE, cookie.to_string())])
}

/// Read the session token from the request cookies.
///
/// # Errors
/// * `MissingCookie` - Cookie absent or empty
pub fn session_token<'a>(jar: &'a CookieJar, name: &str) -> Result<&'a str, TokenError> {
    jar.get(name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(TokenError::MissingCookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("user", "a.b.c".to_string(), 1200);

        assert_eq!(cookie.name(), "user");
        assert_eq!(cookie.value(), "a.b.c");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(1200)));
    }

    #[test]
    fn test_cleared_cookie_expires_now() {
        let cookie = cleared_cookie("user");

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }

    #[test]
    fn test_set_cookie_writes_token_verbatim() {
        let token = "eyJhIjoiYiJ9.e30=.+/8=".to_string();
        let AppendHeaders([(name, value)]) = set_cookie(session_cookie("user", token.clone(), 1200));

        assert_eq!(name, header::SET_COOKIE);
        assert!(value.starts_with(&format!("user={};", token)));
        assert!(!value.contains('%'));
    }

    #[test]
    fn test_session_token_lookup() {
        let jar = CookieJar::new().add(Cookie::new("user", "a.b.c"));
        assert_eq!(session_token(&jar, "user"), Ok("a.b.c"));
        assert_eq!(session_token(&jar, "other"), Err(TokenError::MissingCookie));

        let jar = CookieJar::new().add(Cookie::new("user", ""));
        assert_eq!(session_token(&jar, "user"), Err(TokenError::MissingCookie));
    }
}
