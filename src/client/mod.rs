//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use crate::codec::{CodecError, GbkCodec, TextCodec};
use crate::domain::{
    Account, Affix, MerchantName, MessageText, Password, ProviderTimestamp, RawPhoneNumber,
    ResponseCode, SendOptions, SendSms, SendSmsResponse, ValidationError,
};
use crate::transport::{self, DecodeError};

pub use config::GatewayConfig;

const DEFAULT_SEND_ENDPOINT: &str = "http://221.179.180.158:9007/QxtSms/QxtFirewall";
const DEFAULT_QUOTA_ENDPOINT: &str = "http://221.179.180.158:8081/QxtSms_surplus/surplus";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A request handed to an [`HttpTransport`].
///
/// `form` is empty for `GET` requests (their parameters are already in `url`).
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Form fields with raw byte values (text fields are already GBK-encoded).
    pub form: Vec<(String, Vec<u8>)>,
}

impl HttpRequest {
    /// The `application/x-www-form-urlencoded` body for this request.
    pub fn form_body(&self) -> String {
        transport::encode_form_body(&self.form)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP capability used by [`GatewayClient`].
///
/// Timeouts and cancellation belong to the implementation; the client never retries.
pub trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self
                .client
                .post(&request.url)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(request.form_body()),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone)]
/// Account credentials sent with every gateway call (`OperID` / `OperPass`).
pub struct Credentials {
    account: Account,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        account: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account: Account::new(account)?,
            password: Password::new(password)?,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    fn push_form_params(&self, params: &mut Vec<(String, Vec<u8>)>) {
        params.push((
            Account::FIELD.to_owned(),
            self.account.as_str().as_bytes().to_vec(),
        ));
        params.push((
            Password::FIELD.to_owned(),
            self.password.as_str().as_bytes().to_vec(),
        ));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// - validation failures are raised before any request is made,
/// - `Transport` and `HttpStatus` are HTTP-level failures,
/// - `Provider` is a gateway rejection (HTTP 200 with a failure code).
///
/// When a multi-batch send fails, batches before the failing one were already
/// accepted by the gateway and stay sent.
pub enum GatewayError {
    /// One of the domain constructors rejected an invalid value.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The message cannot be represented in the gateway's encoding.
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than 200.
    #[error("短信服务异常 (HTTP {status})")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway rejected the request; `phrase` is its contractual message for `code`.
    #[error("{phrase}")]
    Provider { code: ResponseCode, phrase: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

impl From<DecodeError> for GatewayError {
    fn from(value: DecodeError) -> Self {
        Self::Parse(Box::new(value))
    }
}

#[derive(Clone)]
/// Builder for [`GatewayClient`].
///
/// Use this when you need a merchant name, an affix, custom endpoints, or a
/// custom transport/codec.
pub struct GatewayClientBuilder {
    credentials: Credentials,
    merchant_name: Option<MerchantName>,
    affix: Option<Affix>,
    send_endpoint: String,
    quota_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    codec: Arc<dyn TextCodec>,
}

impl GatewayClientBuilder {
    /// Create a builder with the default endpoints, GBK codec and no timeout override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            merchant_name: None,
            affix: None,
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            quota_endpoint: DEFAULT_QUOTA_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
            codec: Arc::new(GbkCodec),
        }
    }

    /// Start from application-supplied settings.
    pub fn from_config(settings: GatewayConfig) -> Result<Self, ValidationError> {
        let mut builder = Self::new(Credentials::new(settings.account, settings.password)?);
        if let Some(name) = config::non_blank(settings.name) {
            builder = builder.merchant_name(name)?;
        }
        if let Some(affix) = config::non_blank(settings.affix) {
            builder = builder.affix(affix)?;
        }
        if let Some(url) = config::non_blank(settings.send_url) {
            builder = builder.send_endpoint(url);
        }
        if let Some(url) = config::non_blank(settings.quota_url) {
            builder = builder.quota_endpoint(url);
        }
        Ok(builder)
    }

    /// Merchant name placed around every message according to [`SendOptions::name_pos`].
    pub fn merchant_name(mut self, name: impl Into<String>) -> Result<Self, ValidationError> {
        self.merchant_name = Some(MerchantName::new(name)?);
        Ok(self)
    }

    /// Sender number affix (附加号码), at most 6 digits.
    pub fn affix(mut self, affix: impl Into<String>) -> Result<Self, ValidationError> {
        self.affix = Some(Affix::new(affix)?);
        Ok(self)
    }

    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    pub fn quota_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.quota_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom HTTP transport instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom text codec instead of [`GbkCodec`].
    pub fn codec(mut self, codec: Arc<dyn TextCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::blocking::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }

                let client = builder
                    .build()
                    .map_err(|err| GatewayError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(GatewayClient {
            credentials: self.credentials,
            merchant_name: self.merchant_name,
            affix: self.affix,
            send_endpoint: self.send_endpoint,
            quota_endpoint: self.quota_endpoint,
            http,
            codec: self.codec,
        })
    }
}

#[derive(Clone)]
/// High-level gateway client.
///
/// Calls are blocking and independent; the client holds only immutable settings
/// and shared handles, so it can be cloned or shared across threads freely.
/// By default it uses:
/// - `http://221.179.180.158:9007/QxtSms/QxtFirewall` for sending messages
/// - `http://221.179.180.158:8081/QxtSms_surplus/surplus` for querying quota
pub struct GatewayClient {
    credentials: Credentials,
    merchant_name: Option<MerchantName>,
    affix: Option<Affix>,
    send_endpoint: String,
    quota_endpoint: String,
    http: Arc<dyn HttpTransport>,
    codec: Arc<dyn TextCodec>,
}

impl GatewayClient {
    /// Create a client using the default endpoints and transport.
    ///
    /// For more customization, use [`GatewayClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, GatewayError> {
        GatewayClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> GatewayClientBuilder {
        GatewayClientBuilder::new(credentials)
    }

    /// Build a client from application-supplied settings.
    pub fn from_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        GatewayClientBuilder::from_config(config)?.build()
    }

    /// Validate raw inputs and send.
    ///
    /// Recipients are checked before the message, matching the gateway's own error
    /// precedence. Blank recipient entries are ignored.
    pub fn send<I, S>(
        &self,
        message: impl Into<String>,
        recipients: I,
        options: SendOptions,
    ) -> Result<SendSmsResponse, GatewayError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let recipients = recipients
            .into_iter()
            .map(Into::<String>::into)
            .filter(|it| !it.trim().is_empty())
            .map(RawPhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients.into());
        }

        let request = SendSms::to_many(recipients, MessageText::new(message)?, options)?;
        self.send_sms(&request)
    }

    /// Send a message, splitting recipients into batches the gateway accepts.
    ///
    /// Batches go out one after another. The first failure stops the send; earlier
    /// batches have already been accepted by the gateway and are not undone.
    ///
    /// Errors:
    /// - [`GatewayError::Codec`] if the text cannot be encoded as GBK,
    /// - [`GatewayError::Transport`] / [`GatewayError::HttpStatus`] for HTTP failures,
    /// - [`GatewayError::Provider`] when the gateway rejects a batch.
    #[tracing::instrument(
        name = "send_sms",
        skip_all,
        fields(
            recipients = request.recipients().len(),
            round_trip = request.options().round_trip
        )
    )]
    pub fn send_sms(&self, request: &SendSms) -> Result<SendSmsResponse, GatewayError> {
        let options = request.options();
        let text = options
            .name_pos
            .apply(request.msg(), self.merchant_name.as_ref());
        let content = self.codec.encode(&text)?;
        let valid_time = options
            .expires_at
            .unwrap_or_else(ProviderTimestamp::default_expiry);

        let mut message_ids = options.round_trip.then(BTreeMap::new);
        let mut batches = 0;

        for batch in request.batches() {
            let mut form = Vec::new();
            self.credentials.push_form_params(&mut form);
            form.extend(transport::encode_send_sms_form(
                batch,
                &content,
                valid_time,
                self.affix.as_ref(),
                options,
            ));

            tracing::debug!(batch = batches + 1, size = batch.len(), "submitting batch");
            let response = self.execute(HttpRequest {
                method: HttpMethod::Post,
                url: self.send_endpoint.clone(),
                form,
            })?;

            let xml = transport::decode_xml_body(self.codec.as_ref(), &response.body)?;
            let result = transport::decode_send_sms_xml_response(&xml, options.round_trip)?;
            if !result.code.is_success() {
                tracing::warn!(
                    code = result.code.as_str(),
                    accepted_batches = batches,
                    "gateway rejected batch"
                );
                let phrase = result.code.phrase();
                return Err(GatewayError::Provider {
                    code: result.code,
                    phrase,
                });
            }
            batches += 1;

            if let Some(ids) = message_ids.as_mut() {
                for (phone, id) in result.message_ids {
                    ids.entry(phone).or_insert(id);
                }
            }
        }

        tracing::debug!(batches, "message submitted");
        Ok(SendSmsResponse {
            batches,
            message_ids,
        })
    }

    /// Number of messages the account can still send.
    ///
    /// Any integer the gateway reports is returned as-is, including zero or negative values.
    #[tracing::instrument(name = "query_quota", skip_all)]
    pub fn query_quota(&self) -> Result<i64, GatewayError> {
        let url = transport::encode_quota_url(
            &self.quota_endpoint,
            &self.credentials.account,
            &self.credentials.password,
        );
        let response = self.execute(HttpRequest {
            method: HttpMethod::Get,
            url,
            form: Vec::new(),
        })?;

        let xml = transport::decode_xml_body(self.codec.as_ref(), &response.body)?;
        let quota = transport::decode_quota_xml_response(&xml)?;
        tracing::debug!(quota, "quota queried");
        Ok(quota)
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let response = self
            .http
            .execute(&request)
            .map_err(GatewayError::Transport)?;

        if response.status != 200 {
            let body = transport::decode_xml_body(self.codec.as_ref(), &response.body)
                .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).into_owned());
            let body = body.trim().to_owned();
            return Err(GatewayError::HttpStatus {
                status: response.status,
                body: if body.is_empty() { None } else { Some(body) },
            });
        }
        Ok(response)
    }
}
