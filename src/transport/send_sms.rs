use serde::Deserialize;

use super::form::FormParams;
use super::xml::DecodeError;
use crate::domain::{
    Affix, MessageId, MessageText, MessageType, ProviderTimestamp, RawPhoneNumber, ResponseCode,
    SendOptions,
};

const SEND_TIME_FIELD: &str = "SendTime";
const VALID_TIME_FIELD: &str = "ValidTime";

/// `<response>`: a `<code>` followed by zero or more `<message>` siblings.
#[derive(Debug, Clone, Deserialize)]
struct SendSmsXmlResponse {
    code: String,
    #[serde(default, rename = "message")]
    messages: Vec<SendSmsXmlMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendSmsXmlMessage {
    #[serde(default)]
    desmobile: String,
    #[serde(default)]
    msgid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBatchResult {
    pub code: ResponseCode,
    pub message_ids: Vec<(RawPhoneNumber, MessageId)>,
}

/// Form fields for one batch, after the credentials. `content` is already in the
/// gateway's encoding.
pub fn encode_send_sms_form(
    batch: &[RawPhoneNumber],
    content: &[u8],
    valid_time: ProviderTimestamp,
    affix: Option<&Affix>,
    options: &SendOptions,
) -> FormParams {
    let send_time = options
        .send_time
        .map(ProviderTimestamp::format)
        .unwrap_or_default();
    let to = batch
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");

    vec![
        (SEND_TIME_FIELD.to_owned(), send_time.into_bytes()),
        (VALID_TIME_FIELD.to_owned(), valid_time.format().into_bytes()),
        (
            Affix::FIELD.to_owned(),
            affix.map(|it| it.as_str().as_bytes().to_vec()).unwrap_or_default(),
        ),
        (RawPhoneNumber::FIELD.to_owned(), to.into_bytes()),
        (MessageText::FIELD.to_owned(), content.to_vec()),
        (
            MessageType::FIELD.to_owned(),
            options.msg_type.content_type().to_string().into_bytes(),
        ),
    ]
}

/// Decode a `<response>` body.
///
/// `<message>` entries are read only when `round_trip` is set and the code is a
/// success. Entries with a blank number or id are skipped.
pub fn decode_send_sms_xml_response(
    xml: &str,
    round_trip: bool,
) -> Result<SendBatchResult, DecodeError> {
    let parsed: SendSmsXmlResponse = quick_xml::de::from_str(xml)?;
    let code = ResponseCode::new(parsed.code);
    if !round_trip || !code.is_success() {
        return Ok(SendBatchResult {
            code,
            message_ids: Vec::new(),
        });
    }

    let message_ids = parsed
        .messages
        .into_iter()
        .filter_map(|message| {
            let phone = RawPhoneNumber::new(message.desmobile).ok()?;
            let id = MessageId::new(message.msgid).ok()?;
            Some((phone, id))
        })
        .collect();

    Ok(SendBatchResult { code, message_ids })
}
