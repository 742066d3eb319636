//! Container Health Model
//!
//! Request-scoped view of a container as seen during one scrape:
//! its identity plus the status string Docker recorded for its
//! healthcheck. Nothing here is cached between scrapes.

use std::fmt;

/// Status string the runtime uses for a passing healthcheck.
pub const HEALTHY_SENTINEL: &str = "healthy";

/// Health status reported by a container's healthcheck.
///
/// Unknown strings are preserved verbatim in `Other` so the exported
/// `value` label always matches what the runtime said.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    /// Last healthcheck probe passed.
    Healthy,
    /// Failing streak exceeded the configured retries.
    Unhealthy,
    /// Still inside the start period.
    Starting,
    /// Any other non-empty status string.
    Other(String),
}

impl HealthStatus {
    /// Parse a runtime status string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            HEALTHY_SENTINEL => Self::Healthy,
            "unhealthy" => Self::Unhealthy,
            "starting" => Self::Starting,
            other => Self::Other(other.to_string()),
        }
    }

    /// The exact status string as reported by the runtime.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Healthy => HEALTHY_SENTINEL,
            Self::Unhealthy => "unhealthy",
            Self::Starting => "starting",
            Self::Other(s) => s,
        }
    }

    /// Whether this status equals the healthy sentinel.
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running container with a configured healthcheck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Runtime-assigned container id.
    pub id: String,
    /// Display name, without Docker's leading `/`.
    pub name: String,
    /// Current healthcheck status.
    pub status: HealthStatus,
    /// When the container was inspected (Unix ms).
    pub observed_at_ms: i64,
}

/// Strip the leading `/` Docker puts on container names.
pub fn display_name(raw: &str) -> &str {
    raw.strip_prefix('/').unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(HealthStatus::parse("healthy"), HealthStatus::Healthy);
        assert_eq!(HealthStatus::parse("unhealthy"), HealthStatus::Unhealthy);
        assert_eq!(HealthStatus::parse("starting"), HealthStatus::Starting);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = HealthStatus::parse("degraded");
        assert_eq!(status, HealthStatus::Other("degraded".to_string()));
        assert_eq!(status.as_str(), "degraded");
        assert!(!status.is_healthy());
    }

    #[test]
    fn only_exact_sentinel_is_healthy() {
        assert!(HealthStatus::parse("healthy").is_healthy());
        assert!(!HealthStatus::parse("Healthy").is_healthy());
        assert!(!HealthStatus::parse("unhealthy").is_healthy());
    }

    #[test]
    fn strips_leading_slash_from_names() {
        assert_eq!(display_name("/web"), "web");
        assert_eq!(display_name("web"), "web");
        assert_eq!(display_name("//odd"), "/odd");
    }
}
