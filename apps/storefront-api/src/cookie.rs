//! Session cookie serialization.
//!
//! Minimal formatting and parsing for the one cookie this API sets. The
//! attributes are fixed policy, not caller options: `HttpOnly` keeps the
//! token away from page scripts, `SameSite=Lax` keeps cross-site POSTs
//! from carrying it, and `Secure` is controlled by config for local
//! development only.

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "freshmart_session";

/// Formats a `Set-Cookie` header value establishing a session.
///
/// ## Arguments
/// * `token` - The JWT session token (no characters outside a JWT alphabet)
/// * `max_age_secs` - Cookie lifetime; should match the token lifetime
/// * `secure` - Whether to include the `Secure` attribute
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Formats a `Set-Cookie` header value clearing the session.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Reads one cookie's value out of a `Cookie` request header.
///
/// Returns `None` when the cookie is absent. Values this API sets are
/// never percent-encoded, so no decoding happens here.
pub fn get(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok.en.value", 86400, true);
        assert!(cookie.starts_with("freshmart_session=tok.en.value;"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.ends_with("Secure"));

        let insecure = session_cookie("t", 60, false);
        assert!(!insecure.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("freshmart_session=;"));
    }

    #[test]
    fn test_get_finds_named_cookie() {
        let header = "theme=dark; freshmart_session=abc.def; other=1";
        assert_eq!(get(header, SESSION_COOKIE).as_deref(), Some("abc.def"));
        assert_eq!(get(header, "missing"), None);
    }
}
