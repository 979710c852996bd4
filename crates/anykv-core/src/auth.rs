//! Credentials attached to operations.

use serde::{Deserialize, Serialize};

/// Credentials for a backend.
///
/// Deserializes from either a bare string (a bearer token) or a
/// `{ user, pass }` table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Auth {
    /// An opaque bearer token.
    Token(String),
    /// A user/password credential pair.
    Basic {
        /// User name.
        user: String,
        /// Password.
        pass: String,
    },
}

impl Auth {
    /// Create a bearer token credential.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Create a user/password credential.
    #[must_use]
    pub fn basic(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self::Basic {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// Pick the credential for one call: the per-call value wins, then the
    /// adapter default. There is no other fallback.
    #[must_use]
    pub fn resolve<'a>(per_call: Option<&'a Self>, default: Option<&'a Self>) -> Option<&'a Self> {
        per_call.or(default)
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("pass", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_call_overrides_default() {
        let call = Auth::token("call");
        let default = Auth::basic("root", "root");
        assert_eq!(Auth::resolve(Some(&call), Some(&default)), Some(&call));
        assert_eq!(Auth::resolve(None, Some(&default)), Some(&default));
        assert_eq!(Auth::resolve(None, None), None);
    }

    #[test]
    fn test_deserialize_token_or_pair() {
        let token: Auth = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(token, Auth::token("abc"));

        let pair: Auth = serde_json::from_str(r#"{"user":"a","pass":"b"}"#).unwrap();
        assert_eq!(pair, Auth::basic("a", "b"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?} {:?}", Auth::token("sk-1"), Auth::basic("a", "hunter2"));
        assert!(!rendered.contains("sk-1"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("user: \"a\""));
    }
}
