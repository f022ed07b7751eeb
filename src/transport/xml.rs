use crate::codec::{CodecError, TextCodec};
use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cannot decode response body: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("invalid value in response: {0}")]
    Value(#[from] ValidationError),

    #[error("quota is not an integer: {value:?}")]
    InvalidQuota { value: String },
}

/// Split a body into its XML declaration (if any) and the rest of the document.
fn split_declaration(body: &[u8]) -> (Option<&str>, &[u8]) {
    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    let rest = &body[start..];
    if !rest.starts_with(b"<?xml") {
        return (None, body);
    }

    match rest.windows(2).position(|w| w == b"?>") {
        Some(end) => {
            let declaration = std::str::from_utf8(&rest[..end]).ok();
            (declaration, &rest[end + 2..])
        }
        None => (None, body),
    }
}

/// Value of the `encoding` pseudo-attribute of an XML declaration.
fn encoding_attribute(declaration: &str) -> Option<&str> {
    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let end = value.find(quote)?;
    Some(&value[..end])
}

/// The encoding declared by an XML body, e.g. `gbk`.
fn declared_encoding(body: &[u8]) -> Option<&str> {
    split_declaration(body).0.and_then(encoding_attribute)
}

/// Decode a gateway body into text using its declared encoding.
///
/// The declaration itself is dropped; the returned document is plain UTF-8.
/// Bodies without a declaration are read as UTF-8.
pub fn decode_xml_body(codec: &dyn TextCodec, body: &[u8]) -> Result<String, DecodeError> {
    let label = declared_encoding(body);
    let (_, document) = split_declaration(body);
    Ok(codec.decode(label, document)?)
}

#[cfg(test)]
mod tests {
    use crate::codec::GbkCodec;

    use super::*;

    #[test]
    fn reads_declared_encoding_with_either_quote_style() {
        assert_eq!(
            declared_encoding(br#"<?xml version="1.0" encoding="GBK"?><a/>"#),
            Some("GBK")
        );
        assert_eq!(
            declared_encoding(b"  <?xml version='1.0' encoding = 'gbk' ?><a/>"),
            Some("gbk")
        );
        assert_eq!(declared_encoding(br#"<?xml version="1.0"?><a/>"#), None);
        assert_eq!(declared_encoding(b"<a/>"), None);
    }

    #[test]
    fn decodes_gbk_body_and_drops_declaration() {
        let mut body = br#"<?xml version="1.0" encoding="gbk" ?><r>"#.to_vec();
        body.extend_from_slice(&[0xB6, 0xCC, 0xD0, 0xC5]);
        body.extend_from_slice(b"</r>");

        let text = decode_xml_body(&GbkCodec, &body).unwrap();
        assert_eq!(text, "<r>短信</r>");
    }

    #[test]
    fn undeclared_bodies_pass_through_as_utf8() {
        let text = decode_xml_body(&GbkCodec, "<r>短信</r>".as_bytes()).unwrap();
        assert_eq!(text, "<r>短信</r>");
    }
}
