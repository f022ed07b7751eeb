use url::form_urlencoded::{self, byte_serialize};

/// Form fields with raw byte values; the gateway wants some of them in GBK.
pub type FormParams = Vec<(String, Vec<u8>)>;

/// Serialize form fields as `application/x-www-form-urlencoded`, escaping raw bytes.
pub fn encode_form_body(params: &[(String, Vec<u8>)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                byte_serialize(key.as_bytes()).collect::<String>(),
                byte_serialize(value).collect::<String>()
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append query parameters to `base`, which may or may not already carry a query string.
pub fn append_query(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_owned();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    if !base.contains('?') {
        format!("{base}?{query}")
    } else if base.ends_with('?') || base.ends_with('&') {
        format!("{base}{query}")
    } else {
        format!("{base}&{query}")
    }
}
