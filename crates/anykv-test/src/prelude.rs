//! Prelude module - commonly used test helpers.

pub use crate::{MockAdapter, MockTransport, RecordedCall};
pub use crate::{err_envelope, init_test_tracing, ok_envelope, test_user, test_user_init};
