//! Dashboard session.
//!
//! The current operator is an explicit value created with [`Session::begin`]
//! and closed with [`Session::end`]. Operations that need to know who is
//! looking at the dashboard take a `&Session`; nothing is looked up globally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SessionConfig;

/// What the operator does at the college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
    Faculty,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Faculty => "Faculty",
            Role::Viewer => "Viewer",
        }
    }
}

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub name: String,
    pub role: Role,
}

/// An open dashboard session.
#[derive(Debug)]
pub struct Session {
    operator: Operator,
    started_at: DateTime<Utc>,
}

/// What remains after a session is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub operator: Operator,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at - self.started_at
    }
}

impl Session {
    /// Open a session for `operator`.
    pub fn begin(operator: Operator) -> Self {
        log::debug!(
            "Session opened for {} ({})",
            operator.name,
            operator.role.as_str()
        );
        Self {
            operator,
            started_at: Utc::now(),
        }
    }

    /// Open a session for the operator named in the configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::begin(Operator {
            name: config.user.trim().to_string(),
            role: config.role,
        })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Close the session. Consumes it so it cannot be used afterwards.
    pub fn end(self) -> SessionSummary {
        let summary = SessionSummary {
            operator: self.operator,
            started_at: self.started_at,
            ended_at: Utc::now(),
        };
        log::debug!(
            "Session closed for {} after {} ms",
            summary.operator.name,
            summary.duration().num_milliseconds()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let session = Session::begin(Operator {
            name: "registrar".to_string(),
            role: Role::Staff,
        });
        assert_eq!(session.operator().role, Role::Staff);

        let started = session.started_at();
        let summary = session.end();
        assert_eq!(summary.started_at, started);
        assert!(summary.ended_at >= summary.started_at);
        assert!(summary.duration().num_milliseconds() >= 0);
    }

    #[test]
    fn test_from_config_trims_name() {
        let config = SessionConfig {
            user: "  dean ".to_string(),
            role: Role::Admin,
        };
        let session = Session::from_config(&config);
        assert_eq!(session.operator().name, "dean");
    }
}
