use chrono::{NaiveDateTime, TimeDelta, Utc};
use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Maximum message length accepted by the gateway, counted in characters (not bytes).
pub const MESSAGE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account id (`OperID`).
///
/// Invariant: non-empty after trimming.
pub struct Account(String);

impl Account {
    /// Form field name used by the gateway (`OperID`).
    pub const FIELD: &'static str = "OperID";

    /// Create a validated [`Account`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Gateway password (`OperPass`), usually already MD5-hashed by the account owner.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by the gateway (`OperPass`).
    pub const FIELD: &'static str = "OperPass";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Merchant display name placed around the message text, e.g. `【XXX】`.
///
/// Invariant: non-empty after trimming.
pub struct MerchantName(String);

impl MerchantName {
    const FIELD: &'static str = "name";

    /// Create a validated [`MerchantName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender number affix (`AppendID`, 附加号码).
///
/// It becomes part of the sender number shown to subscribers.
/// Invariant: 1 to 6 ASCII digits.
pub struct Affix(String);

impl Affix {
    /// Form field name used by the gateway (`AppendID`).
    pub const FIELD: &'static str = "AppendID";

    /// Maximum number of digits accepted by the gateway.
    pub const MAX_DIGITS: usize = 6;

    /// Create a validated [`Affix`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.len() > Self::MAX_DIGITS
            || !trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidAffix {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`Content`).
///
/// Invariant: non-empty after trimming and at most [`MESSAGE_MAX_CHARS`] characters.
/// Surrounding whitespace is removed before the length check.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the gateway (`Content`).
    pub const FIELD: &'static str = "Content";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let chars = trimmed.chars().count();
        if chars > MESSAGE_MAX_CHARS {
            return Err(ValidationError::MessageTooLong {
                max: MESSAGE_MAX_CHARS,
                actual: chars,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the (trimmed) message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Provider-assigned message id (`msgid`) returned when round-trip is requested.
pub struct MessageId(String);

impl MessageId {
    const FIELD: &'static str = "msgid";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to the gateway (`DesMobile`).
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`] for normalization.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the gateway (`DesMobile`).
    pub const FIELD: &'static str = "DesMobile";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// The gateway expects mainland numbers without the country prefix.
    fn from(value: PhoneNumber) -> Self {
        Self(value.national)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    national: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Region assumed by [`PhoneNumber::parse_cn`].
    pub const DEFAULT_REGION: country::Id = country::Id::CN;

    /// Parse a phone number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let national = parsed.national().value().to_string();

        Ok(Self {
            raw,
            e164,
            national,
            parsed,
        })
    }

    /// Parse a phone number, assuming mainland China when no prefix is present.
    pub fn parse_cn(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(Self::DEFAULT_REGION), input)
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// National significant number (no country prefix).
    pub fn national(&self) -> &str {
        &self.national
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Wall-clock timestamp in the gateway's `YYYYMMDDHHMMSS` format.
///
/// Used for scheduled sends (`SendTime`) and expiry (`ValidTime`). The gateway
/// interprets these in China Standard Time.
pub struct ProviderTimestamp(NaiveDateTime);

impl ProviderTimestamp {
    /// `chrono` format string of the wire representation.
    pub const FORMAT: &'static str = "%Y%m%d%H%M%S";

    /// Offset of the gateway's wall clock from UTC, in hours.
    pub const PROVIDER_UTC_OFFSET_HOURS: i64 = 8;

    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Parse a `YYYYMMDDHHMMSS` string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        NaiveDateTime::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimestamp {
                input: trimmed.to_owned(),
            })
    }

    /// Current gateway wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().naive_utc() + TimeDelta::hours(Self::PROVIDER_UTC_OFFSET_HOURS))
    }

    /// Gateway wall-clock time `delta` from now.
    pub fn from_now(delta: TimeDelta) -> Self {
        Self(Self::now().0 + delta)
    }

    /// Default expiry applied when a request does not carry one: 24 hours from now.
    pub fn default_expiry() -> Self {
        Self::from_now(TimeDelta::hours(24))
    }

    pub fn value(self) -> NaiveDateTime {
        self.0
    }

    /// Wire representation (`YYYYMMDDHHMMSS`).
    pub fn format(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Business status code returned by the gateway in `<code>`.
///
/// The raw string is preserved as-is even when unknown to this crate.
pub struct ResponseCode(String);

impl ResponseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_owned())
    }

    /// Get the code as provided by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(&self) -> Option<KnownResponseCode> {
        KnownResponseCode::from_code(&self.0)
    }

    /// Only `00`, `01` and `03` mean the messages were accepted.
    pub fn is_success(&self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_success())
    }

    /// Human-readable phrase for this code, with a generic fallback for unknown codes.
    pub fn phrase(&self) -> String {
        match self.known() {
            Some(kind) => kind.phrase().to_owned(),
            None => format!("短信发送异常({})", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known gateway response codes.
pub enum KnownResponseCode {
    SubmittedBatch,
    SubmittedPersonalized,
    IpRestricted,
    SubmittedSingle,
    InvalidAccount,
    InvalidPassword,
    MobileContentCountMismatch,
    InvalidSendTime,
    SensitiveContent,
    DuplicateContentSameDay,
    InvalidAffix,
    InsufficientBalance,
    ServerError,
}

impl KnownResponseCode {
    /// Convert a raw gateway code into a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "00" => Self::SubmittedBatch,
            "01" => Self::SubmittedPersonalized,
            "02" => Self::IpRestricted,
            "03" => Self::SubmittedSingle,
            "04" => Self::InvalidAccount,
            "05" => Self::InvalidPassword,
            "06" => Self::MobileContentCountMismatch,
            "07" => Self::InvalidSendTime,
            "08" => Self::SensitiveContent,
            "09" => Self::DuplicateContentSameDay,
            "10" => Self::InvalidAffix,
            "11" => Self::InsufficientBalance,
            "-1" => Self::ServerError,
            _ => return None,
        })
    }

    /// The gateway's contractual phrase for this code.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::SubmittedBatch | Self::SubmittedPersonalized | Self::SubmittedSingle => {
                "短信提交成功"
            }
            Self::IpRestricted => "IP限制",
            Self::InvalidAccount => "用户名错误",
            Self::InvalidPassword => "密码错误",
            Self::MobileContentCountMismatch => "自定义短信手机号个数与内容个数不相等",
            Self::InvalidSendTime => "发送时间错误",
            Self::SensitiveContent => "短信包含敏感内容",
            Self::DuplicateContentSameDay => "同天内不能向用户重复发送该短信内容",
            Self::InvalidAffix => "扩展号错误",
            Self::InsufficientBalance => "余额不足",
            Self::ServerError => "短信服务器异常",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::SubmittedBatch | Self::SubmittedPersonalized | Self::SubmittedSingle
        )
    }

    /// Whether this code indicates rejected credentials or caller address.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::IpRestricted | Self::InvalidAccount | Self::InvalidPassword
        )
    }
}
