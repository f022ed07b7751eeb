use std::collections::BTreeMap;

use crate::domain::value::{MessageId, RawPhoneNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    /// Number of gateway requests issued (one per batch).
    pub batches: usize,
    /// Message ids by recipient; `None` unless round-trip was requested.
    ///
    /// The gateway may omit recipients, so the keys need not cover every input number.
    pub message_ids: Option<BTreeMap<RawPhoneNumber, MessageId>>,
}
