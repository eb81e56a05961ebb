//! Endpoints a [`Connect`](crate::Connect) action can dial.

use serde::Serialize;
use serde_json::{Map, Value};

/// Destination of a `connect` action.
///
/// Every variant carries its own `type` discriminant on the wire, injected at
/// serialization time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Endpoint {
    /// PSTN phone number
    Phone(PhoneEndpoint),
    /// WebSocket media stream
    Websocket(WebSocketEndpoint),
    /// SIP URI
    Sip(SipEndpoint),
}

impl Endpoint {
    /// Wire name of the endpoint type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Phone(_) => "phone",
            Self::Websocket(_) => "websocket",
            Self::Sip(_) => "sip",
        }
    }

    /// Shorthand for a phone endpoint with only a number
    pub fn phone(number: impl Into<String>) -> Self {
        Self::Phone(PhoneEndpoint::new(number))
    }
}

/// Phone number endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneEndpoint {
    /// Number to dial, in E.164 format without the leading `+`
    pub number: String,
    /// Digits sent once the call is answered
    #[serde(skip_serializing_if = "crate::action::is_unset")]
    pub dtmf_answer: Option<String>,
    /// URL of an NCCO played to the callee on answer
    #[serde(skip_serializing_if = "crate::action::is_unset")]
    pub on_answer: Option<String>,
}

impl PhoneEndpoint {
    /// Create a phone endpoint for `number`
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Self::default()
        }
    }

    /// Send DTMF digits when the callee answers
    #[must_use]
    pub fn with_dtmf_answer(mut self, digits: impl Into<String>) -> Self {
        self.dtmf_answer = Some(digits.into());
        self
    }

    /// Play the NCCO at `url` to the callee when they answer
    #[must_use]
    pub fn with_on_answer(mut self, url: impl Into<String>) -> Self {
        self.on_answer = Some(url.into());
        self
    }
}

impl From<PhoneEndpoint> for Endpoint {
    fn from(endpoint: PhoneEndpoint) -> Self {
        Self::Phone(endpoint)
    }
}

/// WebSocket endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebSocketEndpoint {
    /// `ws://` or `wss://` URI
    pub uri: String,
    /// Audio content type, e.g. `audio/l16;rate=16000`
    #[serde(rename = "content-type", skip_serializing_if = "crate::action::is_unset")]
    pub content_type: Option<String>,
    /// Arbitrary headers forwarded in the initial WebSocket message
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, Value>,
}

impl WebSocketEndpoint {
    /// Create a WebSocket endpoint for `uri`
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Set the audio content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add a header sent with the opening message
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl From<WebSocketEndpoint> for Endpoint {
    fn from(endpoint: WebSocketEndpoint) -> Self {
        Self::Websocket(endpoint)
    }
}

/// SIP endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SipEndpoint {
    /// SIP URI, e.g. `sip:rebekka@sip.example.com`
    pub uri: String,
}

impl SipEndpoint {
    /// Create a SIP endpoint for `uri`
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl From<SipEndpoint> for Endpoint {
    fn from(endpoint: SipEndpoint) -> Self {
        Self::Sip(endpoint)
    }
}
