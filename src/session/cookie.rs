//! Cookie header parsing and session cookie serialization.

use std::collections::HashMap;
use std::time::Duration;

use super::COOKIE_NAME;

/// Parse a `Cookie` request header into name/value pairs.
///
/// Pairs are split on `;`, then on the first `=`. Names and values are
/// trimmed and values percent-decoded; a value with broken encoding is kept
/// as-is. Pairs without `=` are dropped.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let value = value.trim();
            let decoded = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            Some((name.trim().to_string(), decoded))
        })
        .collect()
}

/// `Set-Cookie` value carrying a session token.
///
/// `Secure` is only added when the deployment runs behind TLS.
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    build(
        &format!("{}={}", COOKIE_NAME, urlencoding::encode(token)),
        max_age.as_secs(),
        secure,
    )
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    build(&format!("{}=", COOKIE_NAME), 0, secure)
}

fn build(pair: &str, max_age_secs: u64, secure: bool) -> String {
    let mut parts = vec![
        pair.to_string(),
        format!("Max-Age={}", max_age_secs),
        "Path=/".into(),
        "HttpOnly".into(),
        "SameSite=Lax".into(),
    ];
    if secure {
        parts.push("Secure".into());
    }
    parts.join("; ")
}
