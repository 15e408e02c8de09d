//! Minimal view of the hosted auth provider.
//!
//! The workflows only ever ask "who, if anyone, is signed in" so they can
//! pre-fill contact fields; nothing here performs authentication.

/// Signed-in visitor as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub email: String,
    pub display_name: Option<String>,
}

/// Seam over the auth provider's current-session lookup.
pub trait SessionGateway: Send + Sync {
    fn current_session(&self) -> Option<UserSession>;
}

/// URL a handler can redirect an anonymous visitor to, carrying the page
/// to return to after sign-in.
pub fn login_redirect(base_url: &str, return_path: &str) -> String {
    let mut encoded = String::with_capacity(return_path.len());
    for byte in return_path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    format!("{base_url}/login?return_to={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_escapes_query_characters() {
        let url = login_redirect("https://parkview.example", "/apartments/apt-101?tab=apply");
        assert_eq!(
            url,
            "https://parkview.example/login?return_to=/apartments/apt-101%3Ftab%3Dapply"
        );
    }

    #[test]
    fn login_redirect_keeps_plain_paths() {
        let url = login_redirect("https://parkview.example", "/schedule");
        assert_eq!(url, "https://parkview.example/login?return_to=/schedule");
    }
}
