//! Calendar events: drafts without timing, and events bound to a [`CyclicTime`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cyclic::CyclicTime;

/// An event whose identity is known but whose time has not been chosen yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub online: bool,
    /// Owner id of the hosting participant.
    pub host: String,
    /// Owner ids of invited participants. The host is never listed here.
    #[serde(default)]
    pub invitees: BTreeSet<String>,
}

impl EventDraft {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Add an invitee. Inviting the host is a no-op.
    pub fn invite(mut self, invitee: impl Into<String>) -> Self {
        let invitee = invitee.into();
        if invitee != self.host {
            self.invitees.insert(invitee);
        }
        self
    }

    /// Host followed by the invitees in id order.
    pub fn participants(&self) -> Vec<&str> {
        std::iter::once(self.host.as_str())
            .chain(
                self.invitees
                    .iter()
                    .map(String::as_str)
                    .filter(|id| *id != self.host),
            )
            .collect()
    }

    /// Bind the draft to a time.
    pub fn at(self, time: CyclicTime) -> Event {
        Event { draft: self, time }
    }
}

/// A fully timed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub draft: EventDraft,
    pub time: CyclicTime,
}

impl Event {
    pub fn name(&self) -> &str {
        &self.draft.name
    }

    pub fn host(&self) -> &str {
        &self.draft.host
    }

    pub fn invitees(&self) -> &BTreeSet<String> {
        &self.draft.invitees
    }

    pub fn participants(&self) -> Vec<&str> {
        self.draft.participants()
    }
}
