//! Navigation between the overview and content sections
//!
//! ```text
//! Overview ──select(id)──▶ Transitioning ──settle──▶ Section(id)
//! Section  ──back()──────▶ Transitioning ──settle──▶ Overview
//! ```
//!
//! While transitioning every request except the matching settle is dropped,
//! so a double click cannot stack two fades on top of each other.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Identifier of a content section (matches the panel's element id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where a transition ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Overview,
    Section(SectionId),
}

/// Identifies one transition so a late settle for an older one is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Overview,
    Transitioning { to: Destination, ticket: Ticket },
    Section(SectionId),
}

impl NavigationState {
    pub fn is_overview(&self) -> bool {
        matches!(self, Self::Overview)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    /// The section being shown, once the transition into it has settled
    pub fn section(&self) -> Option<&SectionId> {
        match self {
            Self::Section(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    Select(SectionId),
    Back,
    /// The guard interval for `Ticket` has elapsed
    Settle(Ticket),
}

/// What an accepted request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A transition started; settle it with `ticket` after the guard interval
    Departed { to: Destination, ticket: Ticket },
    Arrived(Destination),
}

enum Outcome {
    Depart(Destination),
    Arrive(Destination),
    Ignore,
}

/// Owner of the navigation state and its single transition function
#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigationState,
    guard_interval: Duration,
    issued: u64,
}

impl Navigator {
    pub fn new(guard_interval: Duration) -> Self {
        Self {
            state: NavigationState::Overview,
            guard_interval,
            issued: 0,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn guard_interval(&self) -> Duration {
        self.guard_interval
    }

    /// Apply a request; `None` means it was not legal in the current state
    pub fn apply(&mut self, request: NavigationRequest) -> Option<NavigationEvent> {
        let outcome = match (&self.state, &request) {
            (NavigationState::Transitioning { to, ticket }, NavigationRequest::Settle(t))
                if ticket == t =>
            {
                Outcome::Arrive(to.clone())
            }
            (NavigationState::Transitioning { .. }, _) => Outcome::Ignore,
            (_, NavigationRequest::Settle(_)) => Outcome::Ignore,
            (NavigationState::Overview, NavigationRequest::Select(id)) => {
                Outcome::Depart(Destination::Section(id.clone()))
            }
            (NavigationState::Section(current), NavigationRequest::Select(id)) if current != id => {
                Outcome::Depart(Destination::Section(id.clone()))
            }
            (NavigationState::Section(_), NavigationRequest::Back) => {
                Outcome::Depart(Destination::Overview)
            }
            _ => Outcome::Ignore,
        };

        match outcome {
            Outcome::Depart(to) => {
                self.issued += 1;
                let ticket = Ticket(self.issued);
                debug!(?to, "Navigation transition started");
                self.state = NavigationState::Transitioning {
                    to: to.clone(),
                    ticket,
                };
                Some(NavigationEvent::Departed { to, ticket })
            }
            Outcome::Arrive(to) => {
                debug!(?to, "Navigation transition settled");
                self.state = match &to {
                    Destination::Overview => NavigationState::Overview,
                    Destination::Section(id) => NavigationState::Section(id.clone()),
                };
                Some(NavigationEvent::Arrived(to))
            }
            Outcome::Ignore => {
                debug!(?request, state = ?self.state, "Navigation request ignored");
                None
            }
        }
    }
}
