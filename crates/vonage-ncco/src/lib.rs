//! # Vonage NCCO Builder
//!
//! Builds Nexmo Call Control Objects: the ordered JSON array of actions that
//! drives a Voice API call.
//!
//! ## Design
//!
//! - **Closed action set**: [`Action`] is an enum; the `action` discriminant is
//!   injected on serialization, never stored.
//! - **Normalization on output**: string loop counts and the tri-state
//!   `startOnEnter` are resolved when the NCCO is rendered, so an [`Ncco`] can be
//!   inspected and extended freely before it is sent.
//! - **Insertion order**: actions are emitted in the order they were added.
//!
//! ## Usage
//!
//! ```rust
//! use vonage_ncco::{Connect, Endpoint, Ncco, Talk};
//!
//! let mut ncco = Ncco::new();
//! ncco.add_action(Talk::new("Connecting you now").with_voice_name("Nicole"));
//! ncco.add_action(Connect::new(Endpoint::phone("447770007777")).with_from("447770008888"));
//!
//! let json = ncco.to_json().unwrap();
//! assert!(json.starts_with(r#"[{"action":"talk""#));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod action;
pub mod endpoint;

pub use action::{
    Action, Connect, Conversation, DEFAULT_LOOP, DtmfInput, Input, Notify, Record, Stream, Talk,
};
pub use endpoint::{Endpoint, PhoneEndpoint, SipEndpoint, WebSocketEndpoint};

use serde::Serialize;
use tracing::trace;

/// An ordered, append-only list of call actions.
///
/// Serializes directly as the JSON array the Voice API expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ncco {
    actions: Vec<Action>,
}

impl Ncco {
    /// Create an empty NCCO
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action
    pub fn add_action(&mut self, action: impl Into<Action>) {
        let action = action.into();
        trace!(action = action.name(), position = self.actions.len(), "Appending NCCO action");
        self.actions.push(action);
    }

    /// Append an action, builder style
    #[must_use]
    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.add_action(action);
        self
    }

    /// Actions in insertion order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action has been added
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Render as compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if `serde_json` fails to serialize an action.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render as indented JSON
    ///
    /// # Errors
    ///
    /// See [`Ncco::to_json`].
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render as a [`serde_json::Value`] array, for embedding in a larger request
    ///
    /// # Errors
    ///
    /// See [`Ncco::to_json`].
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl<A: Into<Action>> FromIterator<A> for Ncco {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<A: Into<Action>> Extend<A> for Ncco {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for action in iter {
            self.add_action(action);
        }
    }
}

impl IntoIterator for Ncco {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ncco {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ncco_serializes_as_empty_array() {
        let ncco = Ncco::new();
        assert!(ncco.is_empty());
        assert_eq!(ncco.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_actions_is_non_destructive() {
        let mut ncco = Ncco::new();
        ncco.add_action(Talk::new("one"));

        assert_eq!(ncco.actions().len(), 1);
        assert_eq!(ncco.actions().len(), 1);

        ncco.add_action(Talk::new("two"));
        assert_eq!(ncco.len(), 2);
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut ncco: Ncco = vec![Talk::new("a"), Talk::new("b")].into_iter().collect();
        ncco.extend([Conversation::new("room")]);

        let names: Vec<&str> = ncco.actions().iter().map(Action::name).collect();
        assert_eq!(names, ["talk", "talk", "conversation"]);
    }

    #[test]
    fn test_to_value_is_array() {
        let ncco = Ncco::new().with_action(Talk::new("hi"));
        let value = ncco.to_value().unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["text"], "hi");
    }

    #[test]
    fn test_pretty_output_contains_newlines() {
        let ncco = Ncco::new().with_action(Talk::new("hi"));
        assert!(ncco.to_json_pretty().unwrap().contains('\n'));
    }
}
