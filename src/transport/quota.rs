use serde::Deserialize;

use super::form::append_query;
use super::xml::DecodeError;
use crate::domain::{Account, Password};

/// `<resRoot><rcode>10</rcode></resRoot>`
#[derive(Debug, Clone, Deserialize)]
struct QuotaXmlResponse {
    rcode: String,
}

pub fn encode_quota_url(endpoint: &str, account: &Account, password: &Password) -> String {
    append_query(
        endpoint,
        &[
            (Account::FIELD, account.as_str()),
            (Password::FIELD, password.as_str()),
        ],
    )
}

/// Remaining sendable messages. Zero and negative values are passed through.
pub fn decode_quota_xml_response(xml: &str) -> Result<i64, DecodeError> {
    let parsed: QuotaXmlResponse = quick_xml::de::from_str(xml)?;
    let value = parsed.rcode.trim();
    value.parse::<i64>().map_err(|_| DecodeError::InvalidQuota {
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_url_carries_credentials() {
        let account = Account::new("account").unwrap();
        let password = Password::new("password").unwrap();
        assert_eq!(
            encode_quota_url(
                "http://221.179.180.158:8081/QxtSms_surplus/surplus",
                &account,
                &password
            ),
            "http://221.179.180.158:8081/QxtSms_surplus/surplus?OperID=account&OperPass=password"
        );
    }

    #[test]
    fn decode_quota_values() {
        assert_eq!(
            decode_quota_xml_response("<resRoot><rcode>10</rcode></resRoot>").unwrap(),
            10
        );
        assert_eq!(
            decode_quota_xml_response("<resRoot><rcode> 0 </rcode></resRoot>").unwrap(),
            0
        );
        assert_eq!(
            decode_quota_xml_response("<resRoot><rcode>-3</rcode></resRoot>").unwrap(),
            -3
        );
    }

    #[test]
    fn decode_rejects_non_integer_quota() {
        let err = decode_quota_xml_response("<resRoot><rcode>ten</rcode></resRoot>").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidQuota { value } if value == "ten"));

        assert!(matches!(
            decode_quota_xml_response("<resRoot></resRoot>"),
            Err(DecodeError::Xml(_))
        ));
    }
}
