//! Request header synthesis.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use anykv_core::{Auth, KvError, KvResult};

/// `content-type` for raw statement bodies.
pub(crate) const TEXT_PLAIN: &str = "text/plain";
/// `content-type` for JSON bodies, and the `accept` value for every request.
pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Build the `authorization` header value for the resolved credential.
///
/// A token becomes `Bearer <token>`. Anything else goes through basic
/// encoding, which requires a credential pair.
///
/// # Errors
///
/// Returns [`KvError::AuthMisconfigured`] when no credential pair is
/// available for basic encoding.
pub(crate) fn authorization(auth: Option<&Auth>) -> KvResult<String> {
    match auth {
        Some(Auth::Token(token)) => Ok(bearer(token)),
        other => basic(other),
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn basic(auth: Option<&Auth>) -> KvResult<String> {
    let Some(Auth::Basic { user, pass }) = auth else {
        return Err(KvError::AuthMisconfigured(
            "expected basic auth credentials (user/pass); none configured".into(),
        ));
    };
    Ok(format!("Basic {}", STANDARD.encode(format!("{user}:{pass}"))))
}
