//! NCCO actions.
//!
//! Each action is a plain struct with public fields and a [`Default`] impl;
//! the `action` discriminant is added by [`Action`]'s serializer. Fields that
//! the Voice API expects in a different shape from the one callers naturally
//! hold (the string `loop` count and the tri-state `startOnEnter`) are
//! normalized at serialization time.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::endpoint::Endpoint;

/// Loop count emitted when the caller's value is empty or not an integer
pub const DEFAULT_LOOP: i64 = 1;

/// One step of a call flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Text-to-speech
    Talk(Talk),
    /// Send a payload to an event URL
    Notify(Notify),
    /// Record the call
    Record(Record),
    /// Join a named conversation
    Conversation(Conversation),
    /// Play an audio stream
    Stream(Stream),
    /// Collect keypad input
    Input(Input),
    /// Connect the call to an endpoint
    Connect(Connect),
}

impl Action {
    /// Wire name of the action
    pub fn name(&self) -> &'static str {
        match self {
            Self::Talk(_) => "talk",
            Self::Notify(_) => "notify",
            Self::Record(_) => "record",
            Self::Conversation(_) => "conversation",
            Self::Stream(_) => "stream",
            Self::Input(_) => "input",
            Self::Connect(_) => "connect",
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Action {
                fn from(action: $variant) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_action!(Talk, Notify, Record, Conversation, Stream, Input, Connect);

/// Resolve a caller-supplied loop string to the integer sent on the wire.
///
/// Empty or non-integer input yields [`DEFAULT_LOOP`].
pub fn resolve_loop(raw: &str) -> i64 {
    if raw.is_empty() {
        return DEFAULT_LOOP;
    }
    match raw.parse::<i64>() {
        Ok(count) => count,
        Err(e) => {
            debug!(value = %raw, error = %e, "Loop value is not an integer, using default");
            DEFAULT_LOOP
        }
    }
}

/// Resolve a caller-supplied `startOnEnter` string.
///
/// Only a case-insensitive `"false"` disables it; anything else, including an
/// empty string, enables it.
pub fn resolve_start_on_enter(raw: &str) -> bool {
    !raw.eq_ignore_ascii_case("false")
}

/// Scalars the Voice API treats as absent when zero or empty
pub(crate) trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for u32 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl Unset for i32 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

/// `skip_serializing_if` hook: omit `None`, zero and empty values
pub(crate) fn is_unset<T: Unset>(value: &Option<T>) -> bool {
    value.as_ref().is_none_or(Unset::is_unset)
}

fn serialize_loop<S: Serializer>(raw: &String, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(resolve_loop(raw))
}

fn serialize_start_on_enter<S: Serializer>(raw: &String, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(resolve_start_on_enter(raw))
}

/// Read text to the caller.
///
/// `loop_count` is a string so that "unset" and "0" (loop forever) can be told
/// apart; it is emitted as the integer `loop`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    /// Text to synthesize
    pub text: String,
    /// Whether keypad input interrupts playback (always emitted)
    pub barge_in: bool,
    /// Volume, -1 to 1
    #[serde(skip_serializing_if = "is_unset")]
    pub level: Option<i32>,
    /// Named voice
    #[serde(skip_serializing_if = "is_unset")]
    pub voice_name: Option<String>,
    /// Voice style index for the chosen language
    #[serde(skip_serializing_if = "is_unset")]
    pub style: Option<i32>,
    /// BCP-47 language code
    #[serde(skip_serializing_if = "is_unset")]
    pub language: Option<String>,
    /// Number of repetitions, parsed at serialization time
    #[serde(rename = "loop", serialize_with = "serialize_loop")]
    pub loop_count: String,
}

impl Talk {
    /// Talk action reading `text` once
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the raw loop count
    #[must_use]
    pub fn with_loop(mut self, loop_count: impl Into<String>) -> Self {
        self.loop_count = loop_count.into();
        self
    }

    /// Let keypad input interrupt playback
    #[must_use]
    pub fn with_barge_in(mut self, barge_in: bool) -> Self {
        self.barge_in = barge_in;
        self
    }

    /// Set the volume
    #[must_use]
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    /// Use a named voice
    #[must_use]
    pub fn with_voice_name(mut self, voice_name: impl Into<String>) -> Self {
        self.voice_name = Some(voice_name.into());
        self
    }

    /// Set the language and style
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, style: Option<i32>) -> Self {
        self.language = Some(language.into());
        self.style = style;
        self
    }
}

/// Send a custom payload to an event URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notify {
    /// Key/value pairs posted to the event URL
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub payload: BTreeMap<String, String>,
    /// Event URL (the API takes a one-element array)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_url: Vec<String>,
    /// HTTP method for the event URL
    #[serde(skip_serializing_if = "is_unset")]
    pub event_method: Option<String>,
}

impl Notify {
    /// Notify action posting to `event_url`
    pub fn new(event_url: impl Into<String>) -> Self {
        Self {
            event_url: vec![event_url.into()],
            ..Self::default()
        }
    }

    /// Add a payload entry
    #[must_use]
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Set the HTTP method
    #[must_use]
    pub fn with_event_method(mut self, method: impl Into<String>) -> Self {
        self.event_method = Some(method.into());
        self
    }
}

/// Record all or part of the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// `mp3`, `wav` or `ogg`
    #[serde(skip_serializing_if = "is_unset")]
    pub format: Option<String>,
    /// `conversation` to record each direction separately
    #[serde(skip_serializing_if = "is_unset")]
    pub split: Option<String>,
    /// Number of channels, up to 32
    #[serde(skip_serializing_if = "is_unset")]
    pub channels: Option<u32>,
    /// Seconds of silence that stop the recording
    #[serde(skip_serializing_if = "is_unset")]
    pub end_on_silence: Option<u32>,
    /// Key that stops the recording
    #[serde(skip_serializing_if = "is_unset")]
    pub end_on_key: Option<String>,
    /// Maximum recording length in seconds
    #[serde(skip_serializing_if = "is_unset")]
    pub time_out: Option<u32>,
    /// Play a beep when recording starts
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub beep_start: bool,
    /// Recording-finished event URL
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_url: Vec<String>,
    /// HTTP method for the event URL
    #[serde(skip_serializing_if = "is_unset")]
    pub event_method: Option<String>,
}

/// Place the call into a named conversation.
///
/// `start_on_enter` is a string so that an unset value keeps the API default
/// of `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Conversation name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Music played to participants until the conversation starts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub music_on_hold_url: Vec<String>,
    /// End the conversation when this participant leaves
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub end_on_exit: bool,
    /// Record the conversation
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub record: bool,
    /// Leg UUIDs this participant can be heard by
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub can_speak: Vec<String>,
    /// Leg UUIDs this participant can hear
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub can_hear: Vec<String>,
    /// `"false"` (any case) to wait for a moderator; anything else starts immediately
    #[serde(serialize_with = "serialize_start_on_enter")]
    pub start_on_enter: String,
}

impl Conversation {
    /// Conversation action joining `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Play an audio file into the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Audio URL (the API takes a one-element array)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stream_url: Vec<String>,
    /// Volume, -1 to 1
    #[serde(skip_serializing_if = "is_unset")]
    pub level: Option<i32>,
    /// Whether keypad input interrupts playback (always emitted)
    pub barge_in: bool,
    /// Number of repetitions, parsed at serialization time
    #[serde(rename = "loop", serialize_with = "serialize_loop")]
    pub loop_count: String,
}

impl Stream {
    /// Stream action playing `url` once
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            stream_url: vec![url.into()],
            ..Self::default()
        }
    }

    /// Set the raw loop count
    #[must_use]
    pub fn with_loop(mut self, loop_count: impl Into<String>) -> Self {
        self.loop_count = loop_count.into();
        self
    }
}

/// Keypad settings for an [`Input`] action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DtmfInput {
    /// Seconds of inactivity before input is submitted
    #[serde(skip_serializing_if = "is_unset")]
    pub time_out: Option<u32>,
    /// Maximum number of digits
    #[serde(skip_serializing_if = "is_unset")]
    pub max_digits: Option<u32>,
    /// Submit when `#` is pressed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub submit_on_hash: bool,
}

/// Collect digits from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// DTMF collection settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtmf: Option<DtmfInput>,
    /// URL receiving the collected input
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_url: Vec<String>,
    /// HTTP method for the event URL
    #[serde(skip_serializing_if = "is_unset")]
    pub event_method: Option<String>,
}

/// Connect the call to another endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connect {
    /// Endpoints to connect to (always emitted)
    pub endpoint: Vec<Endpoint>,
    /// Caller ID presented to the endpoint
    #[serde(skip_serializing_if = "is_unset")]
    pub from: Option<String>,
    /// Seconds to ring before giving up
    #[serde(skip_serializing_if = "is_unset")]
    pub timeout: Option<u32>,
    /// Maximum call length in seconds
    #[serde(skip_serializing_if = "is_unset")]
    pub limit: Option<u32>,
    /// `continue` or `hangup` when a machine answers
    #[serde(skip_serializing_if = "is_unset")]
    pub machine_detection: Option<String>,
    /// `synchronous` to control the flow from event responses
    #[serde(skip_serializing_if = "is_unset")]
    pub event_type: Option<String>,
    /// Call-progress event URL
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_url: Vec<String>,
    /// HTTP method for the event URL
    #[serde(skip_serializing_if = "is_unset")]
    pub event_method: Option<String>,
    /// Audio URL played while ringing
    #[serde(skip_serializing_if = "is_unset")]
    pub ringback_tone: Option<String>,
}

impl Connect {
    /// Connect action dialing a single endpoint
    pub fn new(endpoint: impl Into<Endpoint>) -> Self {
        Self {
            endpoint: vec![endpoint.into()],
            ..Self::default()
        }
    }

    /// Present `from` as the caller ID
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Give up after `seconds` of ringing
    #[must_use]
    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }
}
