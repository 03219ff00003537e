use axum::http::{header, HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "dashboard_session";

/// Value of the session cookie in the request, if present and non-empty
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> HeaderValue {
    // tokens are hex, always a valid header value
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, token
    ))
    .unwrap_or_else(|_| clear_session_cookie())
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("dashboard_session=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}
