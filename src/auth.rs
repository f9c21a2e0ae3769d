//! HTTP Basic authentication for the admin area.
//!
//! One fixed username, one configured password, no sessions. Anything that
//! fails to match gets a 401 with a `WWW-Authenticate` challenge so the
//! browser prompts for credentials.

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use crate::config::Config;

pub const ADMIN_USER: &str = "admin";
pub const REALM: &str = "shindig admin";

/// Check the request's Basic credentials against the fixed admin username
/// and the configured password.
pub fn authorized(headers: &HeaderMap, config: &Config) -> bool {
    let Some((user, password)) = basic_credentials(headers) else {
        return false;
    };

    let ok = user == ADMIN_USER && password == config.admin_password;
    if !ok {
        warn!(user = %user, "rejected admin credentials");
    }
    ok
}

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;

    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config(password: &str) -> Config {
        Config {
            port: 0,
            admin_password: password.to_string(),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
        }
    }

    fn basic_header(user: &str, password: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        headers.insert(
            header::AUTHORIZATION,
            format!("Basic {encoded}").parse().unwrap(),
        );
        headers
    }

    #[test]
    fn test_accepts_matching_credentials() {
        let config = test_config("hunter2");
        assert!(authorized(&basic_header("admin", "hunter2"), &config));
    }

    #[test]
    fn test_rejects_wrong_password_and_wrong_user() {
        let config = test_config("hunter2");
        assert!(!authorized(&basic_header("admin", "nope"), &config));
        assert!(!authorized(&basic_header("root", "hunter2"), &config));
    }

    #[test]
    fn test_rejects_missing_or_malformed_header() {
        let config = test_config("hunter2");
        assert!(!authorized(&HeaderMap::new(), &config));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert!(!authorized(&headers, &config));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic !!!notbase64".parse().unwrap());
        assert!(!authorized(&headers, &config));
    }

    #[test]
    fn test_password_may_contain_colons() {
        let config = test_config("a:b:c");
        assert!(authorized(&basic_header("admin", "a:b:c"), &config));
    }
}
