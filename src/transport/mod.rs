//! Transport layer: HTTP and wire-format details (form encoding, XML decoding).

mod form;
mod quota;
mod send_sms;
mod xml;

pub use form::encode_form_body;
pub use quota::{decode_quota_xml_response, encode_quota_url};
pub use send_sms::{decode_send_sms_xml_response, encode_send_sms_form};
pub use xml::{DecodeError, decode_xml_body};
