use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    NoRecipients,
    EmptyMessage,
    MessageTooLong { max: usize, actual: usize },
    InvalidAffix { input: String },
    InvalidPhoneNumber { input: String },
    InvalidTimestamp { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::NoRecipients => f.write_str("短信接收用户未指定"),
            Self::EmptyMessage => f.write_str("短信内容为空"),
            Self::MessageTooLong { .. } => f.write_str("短信内容过长"),
            Self::InvalidAffix { input } => {
                write!(f, "invalid affix: {input} (expected 1 to 6 digits)")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidTimestamp { input } => {
                write!(f, "invalid timestamp: {input} (expected YYYYMMDDHHMMSS)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn provider_defined_messages_are_fixed() {
        assert_eq!(ValidationError::NoRecipients.to_string(), "短信接收用户未指定");
        assert_eq!(ValidationError::EmptyMessage.to_string(), "短信内容为空");

        let err = ValidationError::MessageTooLong {
            max: 500,
            actual: 560,
        };
        assert_eq!(err.to_string(), "短信内容过长");
    }

    #[test]
    fn field_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "OperID" };
        assert_eq!(err.to_string(), "OperID must not be empty");

        let err = ValidationError::InvalidAffix {
            input: "12a".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid affix: 12a (expected 1 to 6 digits)");

        let err = ValidationError::InvalidTimestamp {
            input: "tomorrow".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid timestamp: tomorrow (expected YYYYMMDDHHMMSS)"
        );
    }
}
