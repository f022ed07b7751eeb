//! Text codec: converts between Rust strings and the gateway's legacy encodings.
//!
//! The gateway expects form values in GBK and answers with XML declaring
//! `encoding="GBK"`. [`GbkCodec`] is the default; a custom [`TextCodec`] can be
//! injected through [`crate::GatewayClientBuilder::codec`].

use encoding_rs::{Encoding, GBK};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("text contains characters not representable in {encoding}")]
    Unmappable { encoding: &'static str },

    #[error("unknown encoding label: {label}")]
    UnknownLabel { label: String },

    #[error("response body is not valid {encoding}")]
    Malformed { encoding: &'static str },
}

pub trait TextCodec: Send + Sync {
    /// Encode outgoing text into the gateway's encoding.
    fn encode(&self, text: &str) -> Result<Vec<u8>, CodecError>;

    /// Decode a response body. `label` is the encoding declared by the body, if any.
    fn decode(&self, label: Option<&str>, bytes: &[u8]) -> Result<String, CodecError>;
}

/// GBK on the way out; whatever the body declares on the way in (UTF-8 when undeclared).
#[derive(Debug, Clone, Copy, Default)]
pub struct GbkCodec;

impl TextCodec for GbkCodec {
    fn encode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        let (bytes, _, had_errors) = GBK.encode(text);
        if had_errors {
            return Err(CodecError::Unmappable {
                encoding: GBK.name(),
            });
        }
        Ok(bytes.into_owned())
    }

    fn decode(&self, label: Option<&str>, bytes: &[u8]) -> Result<String, CodecError> {
        let encoding = match label {
            Some(label) => Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                CodecError::UnknownLabel {
                    label: label.to_owned(),
                }
            })?,
            None => encoding_rs::UTF_8,
        };

        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(CodecError::Malformed {
                encoding: encoding.name(),
            })
    }
}
