//! Typed Rust client for the Guodu bulk SMS HTTP gateway.
//!
//! The crate is split into a domain layer of validated types, a transport layer
//! for the provider's wire quirks (GBK form bodies, GBK-declared XML responses),
//! and a small client layer orchestrating batched requests.
//!
//! ```rust,no_run
//! use guodu_sms::{Credentials, GatewayClient, MessageText, RawPhoneNumber, SendOptions, SendSms};
//!
//! fn main() -> Result<(), guodu_sms::GatewayError> {
//!     let client = GatewayClient::builder(Credentials::new("account", "password")?)
//!         .merchant_name("【商户】")?
//!         .affix("1234")?
//!         .build()?;
//!     let phone = RawPhoneNumber::new("13800138000")?;
//!     let msg = MessageText::new("您的验证码是 1234")?;
//!     let request = SendSms::one(phone, msg, SendOptions::default());
//!     let _resp = client.send_sms(&request)?;
//!     let _quota = client.query_quota()?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod codec;
pub mod domain;
mod transport;

pub use client::{
    Credentials, GatewayClient, GatewayClientBuilder, GatewayConfig, GatewayError, HttpMethod,
    HttpRequest, HttpResponse, HttpTransport,
};
pub use codec::{CodecError, GbkCodec, TextCodec};
pub use domain::{
    Account, Affix, KnownResponseCode, MESSAGE_MAX_CHARS, MerchantName, MessageId, MessageText,
    MessageType, NamePosition, Password, PhoneNumber, ProviderTimestamp, RawPhoneNumber,
    ResponseCode, SEND_SMS_BATCH_SIZE, SendOptions, SendSms, SendSmsResponse, ValidationError,
};
