//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MessageType, NamePosition, SEND_SMS_BATCH_SIZE, SendOptions, SendSms};
pub use response::SendSmsResponse;
pub use validation::ValidationError;
pub use value::{
    Account, Affix, KnownResponseCode, MESSAGE_MAX_CHARS, MerchantName, MessageId, MessageText,
    Password, PhoneNumber, ProviderTimestamp, RawPhoneNumber, ResponseCode,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(count: usize) -> Vec<RawPhoneNumber> {
        (1..=count)
            .map(|idx| RawPhoneNumber::new(format!("13800{idx:06}")).unwrap())
            .collect()
    }

    #[test]
    fn send_sms_requires_recipients() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendSms::to_many(Vec::new(), msg, SendOptions::default()).unwrap_err();
        assert_eq!(err, ValidationError::NoRecipients);
    }

    #[test]
    fn send_sms_keeps_duplicates() {
        let pn = RawPhoneNumber::new("13800138000").unwrap();
        let msg = MessageText::new("hi").unwrap();
        let request = SendSms::to_many(vec![pn.clone(), pn], msg, SendOptions::default()).unwrap();
        assert_eq!(request.recipients().len(), 2);
    }

    #[test]
    fn batches_split_at_batch_size_preserving_order() {
        let recipients = phones(300);
        let msg = MessageText::new("hi").unwrap();
        let request =
            SendSms::to_many(recipients.clone(), msg, SendOptions::default()).unwrap();

        let batches = request.batches().collect::<Vec<_>>();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], &recipients[..SEND_SMS_BATCH_SIZE]);
        assert_eq!(batches[1], &recipients[SEND_SMS_BATCH_SIZE..]);
    }

    #[test]
    fn exact_batch_size_is_a_single_batch() {
        let msg = MessageText::new("hi").unwrap();
        let request =
            SendSms::to_many(phones(SEND_SMS_BATCH_SIZE), msg, SendOptions::default()).unwrap();
        assert_eq!(request.batches().count(), 1);
    }

    #[test]
    fn message_type_falls_back_to_plain() {
        assert_eq!(MessageType::default().content_type(), 8);
        assert_eq!(MessageType::Long.content_type(), 15);
        assert_eq!(MessageType::from_content_type(15), MessageType::Long);
        assert_eq!(MessageType::from_content_type(8), MessageType::Plain);
        assert_eq!(MessageType::from_content_type(3), MessageType::Plain);
    }

    #[test]
    fn name_position_places_merchant_name() {
        let msg = MessageText::new("验证码1234").unwrap();
        let name = MerchantName::new("【商户】").unwrap();

        assert_eq!(NamePosition::default(), NamePosition::Append);
        assert_eq!(
            NamePosition::Append.apply(&msg, Some(&name)),
            "验证码1234【商户】"
        );
        assert_eq!(
            NamePosition::Prepend.apply(&msg, Some(&name)),
            "【商户】验证码1234"
        );
        assert_eq!(NamePosition::None.apply(&msg, Some(&name)), "验证码1234");
        assert_eq!(NamePosition::Prepend.apply(&msg, None), "验证码1234");
    }
}
