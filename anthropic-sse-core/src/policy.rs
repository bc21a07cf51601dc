//! Event-name dispatch policy.
//!
//! Different API surfaces speak different event vocabularies over the same
//! wire format, so the mapping from event name to action is data, not code.
//! A [`DispatchPolicy`] is built per surface and handed to the dispatcher.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to do with a message carrying a given event name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchAction {
    /// Yield the message downstream unchanged.
    Forward,
    /// Drop the message without any downstream effect.
    #[default]
    Ignore,
    /// End the stream with a protocol error carrying the message data.
    Fail,
}

/// Table mapping event names to dispatch actions.
///
/// Messages whose event name is absent from the table, including unnamed
/// messages, get the `unrecognized` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPolicy {
    /// Explicit per-event actions.
    #[serde(default)]
    pub events: BTreeMap<String, DispatchAction>,
    /// Action for event names not present in `events`.
    #[serde(default)]
    pub unrecognized: DispatchAction,
}

impl DispatchPolicy {
    /// Create an empty policy that ignores everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward the given event names.
    #[must_use]
    pub fn forward<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_action(names, DispatchAction::Forward)
    }

    /// Ignore the given event names.
    #[must_use]
    pub fn ignore<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_action(names, DispatchAction::Ignore)
    }

    /// Treat the given event name as a terminal error.
    #[must_use]
    pub fn error(mut self, name: impl Into<String>) -> Self {
        self.events.insert(name.into(), DispatchAction::Fail);
        self
    }

    /// Set the action for event names missing from the table.
    #[must_use]
    pub fn unrecognized(mut self, action: DispatchAction) -> Self {
        self.unrecognized = action;
        self
    }

    /// Resolve the action for an event name.
    pub fn action_for(&self, event: Option<&str>) -> DispatchAction {
        event
            .and_then(|name| self.events.get(name).copied())
            .unwrap_or(self.unrecognized)
    }

    fn with_action<I, S>(mut self, names: I, action: DispatchAction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.events.insert(name.into(), action);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn policy() -> DispatchPolicy {
        DispatchPolicy::new()
            .forward(["message_start"])
            .ignore(["ping"])
            .error("error")
    }

    #[rstest]
    #[case(Some("message_start"), DispatchAction::Forward)]
    #[case(Some("ping"), DispatchAction::Ignore)]
    #[case(Some("error"), DispatchAction::Fail)]
    #[case(Some("brand_new_event"), DispatchAction::Ignore)]
    #[case(None, DispatchAction::Ignore)]
    fn test_action_for(#[case] event: Option<&str>, #[case] expected: DispatchAction) {
        assert_eq!(policy().action_for(event), expected);
    }

    #[test]
    fn test_unrecognized_override() {
        let policy = policy().unrecognized(DispatchAction::Fail);
        assert_eq!(policy.action_for(Some("other")), DispatchAction::Fail);
        assert_eq!(policy.action_for(None), DispatchAction::Fail);
        assert_eq!(policy.action_for(Some("ping")), DispatchAction::Ignore);
    }

    #[test]
    fn test_later_entries_win() {
        let policy = DispatchPolicy::new().forward(["x"]).ignore(["x"]);
        assert_eq!(policy.action_for(Some("x")), DispatchAction::Ignore);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "events": {"message_start": "forward", "ping": "ignore", "error": "fail"}
        }"#;
        let parsed: DispatchPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, policy());
        assert_eq!(parsed.unrecognized, DispatchAction::Ignore);
    }
}
