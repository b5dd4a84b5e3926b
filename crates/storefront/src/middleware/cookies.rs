//! Cookie parsing and the cookie-backed storage port.
//!
//! Every cookie the storefront writes shares one attribute set: HttpOnly,
//! SameSite=Lax, Path=/, Secure when the site is served over https, and a
//! 30-day Max-Age. Values are percent-encoded so JSON payloads survive
//! the cookie grammar.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue, header};
use cookie::{Cookie, SameSite, time::Duration};

use crate::config::StorefrontConfig;
use crate::stores::StoragePort;

/// Cookies sent by the client, parsed once per request.
#[derive(Debug, Default, Clone)]
pub struct RequestCookies {
    values: HashMap<String, String>,
}

impl RequestCookies {
    /// Parse every `Cookie` header in the request.
    ///
    /// Unparsable fragments are skipped; a broken cookie is the client's
    /// problem, never a request failure.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = HashMap::new();
        for header_value in headers.get_all(header::COOKIE) {
            let Ok(raw) = header_value.to_str() else {
                continue;
            };
            for fragment in raw.split(';') {
                if let Ok(parsed) = Cookie::parse_encoded(fragment.trim().to_owned()) {
                    values.insert(parsed.name().to_owned(), parsed.value().to_owned());
                }
            }
        }
        Self { values }
    }

    /// Read a cookie value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace a value before the jar is handed to a store, e.g. to let
    /// an `Authorization` header take precedence over the token cookie.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }
}

/// Attributes applied to every cookie the storefront sets.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    /// Lifetime of persisted cookies, in days.
    pub ttl_days: i64,
    /// Whether to mark cookies `Secure`.
    pub secure: bool,
}

impl CookiePolicy {
    /// Derive the policy from configuration.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            ttl_days: config.cookie_ttl_days,
            secure: config.cookies_secure(),
        }
    }

    fn build(self, name: &str, value: &str, max_age: Duration) -> HeaderValue {
        let cookie = Cookie::build((name.to_owned(), value.to_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(max_age)
            .build();

        HeaderValue::from_str(&cookie.encoded().to_string()).unwrap_or_else(|_| {
            // Percent-encoding leaves only visible ASCII, so this cannot
            // trigger; an empty value is the safe fallback.
            HeaderValue::from_static("")
        })
    }

    /// Build a `Set-Cookie` header persisting a value.
    #[must_use]
    pub fn set(self, name: &str, value: &str) -> HeaderValue {
        self.build(name, value, Duration::days(self.ttl_days))
    }

    /// Build a `Set-Cookie` header removing a cookie.
    #[must_use]
    pub fn remove(self, name: &str) -> HeaderValue {
        self.build(name, "", Duration::ZERO)
    }
}

/// [`StoragePort`] over the request's cookies.
///
/// Reads see the client's values (as updated by this request's writes);
/// writes accumulate as pending `Set-Cookie` headers for the response,
/// last write per key winning.
pub struct CookieStorage {
    policy: CookiePolicy,
    current: RequestCookies,
    pending: Vec<(String, HeaderValue)>,
}

impl CookieStorage {
    /// Wrap the request's cookies with the store's write policy.
    #[must_use]
    pub fn new(policy: CookiePolicy, cookies: RequestCookies) -> Self {
        Self {
            policy,
            current: cookies,
            pending: Vec::new(),
        }
    }

    fn push_pending(&mut self, key: &str, header: HeaderValue) {
        self.pending.retain(|(name, _)| name != key);
        self.pending.push((key.to_owned(), header));
    }

    /// The accumulated `Set-Cookie` headers, one per written key.
    #[must_use]
    pub fn into_set_cookie_headers(self) -> Vec<HeaderValue> {
        self.pending.into_iter().map(|(_, header)| header).collect()
    }
}

impl StoragePort for CookieStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.current.get(key).map(ToOwned::to_owned)
    }

    fn save(&mut self, key: &str, value: &str) {
        self.current.insert(key, value);
        let header = self.policy.set(key, value);
        self.push_pending(key, header);
    }

    fn clear(&mut self, key: &str) {
        self.current.values.remove(key);
        let header = self.policy.remove(key);
        self.push_pending(key, header);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn policy() -> CookiePolicy {
        CookiePolicy {
            ttl_days: 30,
            secure: false,
        }
    }

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn test_parse_multiple_cookies() {
        let headers = headers_with_cookie("cart=%5B%5D; auth-token=abc.def.ghi");
        let cookies = RequestCookies::from_headers(&headers);

        assert_eq!(cookies.get("cart"), Some("[]"));
        assert_eq!(cookies.get("auth-token"), Some("abc.def.ghi"));
        assert!(cookies.get("missing").is_none());
    }

    #[test]
    fn test_set_cookie_attributes() {
        let header = policy().set("auth-token", "tok");
        let raw = header.to_str().unwrap();

        assert!(raw.starts_with("auth-token=tok"));
        assert!(raw.contains("HttpOnly"));
        assert!(raw.contains("SameSite=Lax"));
        assert!(raw.contains("Path=/"));
        assert!(raw.contains("Max-Age=2592000"));
        assert!(!raw.contains("Secure"));
    }

    #[test]
    fn test_secure_policy_marks_secure() {
        let secure = CookiePolicy {
            ttl_days: 30,
            secure: true,
        };
        let raw = secure.set("cart", "[]").to_str().unwrap().to_owned();
        assert!(raw.contains("Secure"));
    }

    #[test]
    fn test_remove_expires_immediately() {
        let raw = policy().remove("auth-token").to_str().unwrap().to_owned();
        assert!(raw.contains("Max-Age=0"));
    }

    #[test]
    fn test_storage_round_trips_through_encoding() {
        let payload = r#"[{"id":"1","name":"Widget, large"}]"#;
        let mut storage = CookieStorage::new(policy(), RequestCookies::default());
        storage.save("cart", payload);

        // A write is visible to subsequent reads in the same request.
        assert_eq!(storage.load("cart").as_deref(), Some(payload));

        // And the emitted header parses back to the same value.
        let headers = storage.into_set_cookie_headers();
        assert_eq!(headers.len(), 1);
        let raw = headers.first().unwrap().to_str().unwrap();
        let pair = raw.split(';').next().unwrap();
        let parsed = Cookie::parse_encoded(pair.to_owned()).unwrap();
        assert_eq!(parsed.value(), payload);
    }

    #[test]
    fn test_last_write_per_key_wins() {
        let mut storage = CookieStorage::new(policy(), RequestCookies::default());
        storage.save("cart", "[1]");
        storage.save("cart", "[2]");
        storage.clear("auth-token");

        let headers = storage.into_set_cookie_headers();
        assert_eq!(headers.len(), 2, "one header per key");
        let first = headers.first().unwrap().to_str().unwrap();
        assert!(first.contains("%5B2%5D") || first.contains("[2]"));
    }
}
