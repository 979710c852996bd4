//! Response envelopes.
//!
//! Every statement or key operation answers with
//! `{ "status": "OK" | "ERR", "result": ..., "detail"?: ... }`. Envelopes are
//! decoded here, once, into `KvResult<Value>`; nothing past this module
//! looks at the raw status strings.

use serde::Deserialize;
use serde_json::Value;

use anykv_core::{KvError, KvResult, render_param};

/// Envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) enum EnvelopeStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERR")]
    Err,
}

/// One response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope {
    status: EnvelopeStatus,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    detail: Option<String>,
}

impl Envelope {
    /// Unwrap into the result on `OK`, or an [`KvError::OperationFailed`]
    /// carrying `result` as message and `detail` as cause on `ERR`.
    pub(crate) fn into_result(self) -> KvResult<Value> {
        match self.status {
            EnvelopeStatus::Ok => Ok(self.result),
            EnvelopeStatus::Err => Err(KvError::operation_failed(
                render_param(&self.result),
                self.detail,
            )),
        }
    }
}

/// Decode a single envelope from a response body.
pub(crate) fn decode_single(body: &str) -> KvResult<Envelope> {
    serde_json::from_str(body)
        .map_err(|e| KvError::ProtocolViolation(format!("malformed response envelope: {e}")))
}

/// Decode a sequence of envelopes from a response body.
pub(crate) fn decode_batch(body: &str) -> KvResult<Vec<Envelope>> {
    serde_json::from_str(body)
        .map_err(|e| KvError::ProtocolViolation(format!("expected an envelope sequence: {e}")))
}

/// Unwrap a batch in order, failing on the first `ERR` envelope.
pub(crate) fn unwrap_batch(envelopes: Vec<Envelope>) -> KvResult<Vec<Value>> {
    envelopes.into_iter().map(Envelope::into_result).collect()
}
