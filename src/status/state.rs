use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current operational state of a monitored feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Ok,
    ServiceIssue,
    Outage,
}

impl ServiceState {
    /// Every state, in exposition order
    pub const ALL: [ServiceState; 3] = [Self::Ok, Self::Outage, Self::ServiceIssue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ServiceIssue => "service_issue",
            Self::Outage => "outage",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Resolved,
    Outage,
    ServiceIssue,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [Self::Resolved, Self::Outage, Self::ServiceIssue];

    /// The service state this item implies when it is the deciding entry
    pub fn service_state(&self) -> ServiceState {
        match self {
            Self::Resolved => ServiceState::Ok,
            Self::Outage => ServiceState::Outage,
            Self::ServiceIssue => ServiceState::ServiceIssue,
        }
    }
}

/// Details of the incident behind a non-ok state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveIncident {
    pub service_name: String,
    pub region: String,
    pub title: String,
    pub link: String,
    pub guid: String,
}

/// The published state of one feed.
///
/// A snapshot carries an incident if and only if its state is not
/// [`ServiceState::Ok`]; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: ServiceState,
    incident: Option<ActiveIncident>,
    reduced_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn ok(reduced_at: DateTime<Utc>) -> Self {
        Self {
            state: ServiceState::Ok,
            incident: None,
            reduced_at,
        }
    }

    /// Builds a snapshot for an active incident. An `Ok` state drops the
    /// incident.
    pub fn with_incident(
        state: ServiceState,
        incident: ActiveIncident,
        reduced_at: DateTime<Utc>,
    ) -> Self {
        match state {
            ServiceState::Ok => Self::ok(reduced_at),
            _ => Self {
                state,
                incident: Some(incident),
                reduced_at,
            },
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn incident(&self) -> Option<&ActiveIncident> {
        self.incident.as_ref()
    }

    pub fn reduced_at(&self) -> DateTime<Utc> {
        self.reduced_at
    }
}
