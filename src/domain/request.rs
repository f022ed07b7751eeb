use crate::domain::validation::ValidationError;
use crate::domain::value::{MerchantName, MessageText, ProviderTimestamp, RawPhoneNumber};

/// The gateway accepts at most this many recipients per request.
pub const SEND_SMS_BATCH_SIZE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Message type (`ContentType`).
pub enum MessageType {
    /// 普通短信.
    #[default]
    Plain,
    /// 长短信.
    Long,
}

impl MessageType {
    /// Form field name used by the gateway (`ContentType`).
    pub const FIELD: &'static str = "ContentType";

    /// Wire value of this message type.
    pub fn content_type(self) -> u8 {
        match self {
            Self::Plain => 8,
            Self::Long => 15,
        }
    }

    /// Map a raw `ContentType` value; anything other than `15` is sent as plain.
    pub fn from_content_type(value: u8) -> Self {
        match value {
            15 => Self::Long,
            _ => Self::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where the configured merchant name goes in the message text.
pub enum NamePosition {
    None,
    #[default]
    Append,
    Prepend,
}

impl NamePosition {
    /// Apply the placement to `msg`; without a merchant name the text is unchanged.
    pub fn apply(self, msg: &MessageText, name: Option<&MerchantName>) -> String {
        match (self, name) {
            (Self::Append, Some(name)) => format!("{}{}", msg.as_str(), name.as_str()),
            (Self::Prepend, Some(name)) => format!("{}{}", name.as_str(), msg.as_str()),
            _ => msg.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub msg_type: MessageType,
    /// Deliver at this time instead of immediately (`SendTime`).
    pub send_time: Option<ProviderTimestamp>,
    /// How long the gateway may hold the message (`ValidTime`); 24 hours from now when unset.
    pub expires_at: Option<ProviderTimestamp>,
    pub name_pos: NamePosition,
    /// Return the gateway's per-recipient message ids.
    pub round_trip: bool,
}

#[derive(Debug, Clone)]
/// A message sent to one or many recipients.
///
/// Invariant: at least one recipient. Duplicates are kept and sent as given.
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    msg: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn one(recipient: RawPhoneNumber, msg: MessageText, options: SendOptions) -> Self {
        Self {
            recipients: vec![recipient],
            msg,
            options,
        }
    }

    /// Build a request for many recipients. Lists longer than [`SEND_SMS_BATCH_SIZE`]
    /// are split into several gateway requests when sent.
    pub fn to_many(
        recipients: Vec<RawPhoneNumber>,
        msg: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        Ok(Self {
            recipients,
            msg,
            options,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn msg(&self) -> &MessageText {
        &self.msg
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }

    /// Consecutive recipient slices of at most [`SEND_SMS_BATCH_SIZE`], in input order.
    pub fn batches(&self) -> std::slice::Chunks<'_, RawPhoneNumber> {
        self.recipients.chunks(SEND_SMS_BATCH_SIZE)
    }
}
