//! Per-URL resolution reports.

use serde::Serialize;

use crate::domain::entities::{Resolution, ServiceId};
use crate::domain::errors::ResolveError;

/// Error category of a failed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No service matches the URL.
    NotSupported,
    /// The hosting service could not be reached.
    RemoteUnavailable,
    /// The hosting service answered with something unexpected.
    MalformedResponse,
    /// The record store failed.
    Store,
}

impl FailureKind {
    /// Returns a short label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSupported => "not supported",
            Self::RemoteUnavailable => "unavailable",
            Self::MalformedResponse => "malformed response",
            Self::Store => "store error",
        }
    }
}

impl From<&ResolveError> for FailureKind {
    fn from(error: &ResolveError) -> Self {
        match error {
            ResolveError::NotSupported { .. } => Self::NotSupported,
            ResolveError::RemoteUnavailable { .. } => Self::RemoteUnavailable,
            ResolveError::MalformedResponse { .. } => Self::MalformedResponse,
            ResolveError::Store { .. } => Self::Store,
        }
    }
}

/// A URL that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFailure {
    status: &'static str,
    /// Error category.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
    /// Service that handled the URL, if one matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceId>,
    /// Whether retrying later may succeed.
    pub recoverable: bool,
}

impl From<&ResolveError> for UrlFailure {
    fn from(error: &ResolveError) -> Self {
        Self {
            status: "error",
            kind: error.into(),
            message: error.to_string(),
            service: error.service().cloned(),
            recoverable: error.is_recoverable(),
        }
    }
}

/// What happened to one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UrlOutcome {
    /// A service handled the URL.
    Resolved(Resolution),
    /// Resolution failed.
    Failed(UrlFailure),
}

/// Resolution report for one input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlReport {
    /// The URL as given.
    pub url: String,
    /// Outcome.
    #[serde(flatten)]
    pub outcome: UrlOutcome,
}

impl UrlReport {
    /// Builds a report from a resolver result.
    #[must_use]
    pub fn new(url: impl Into<String>, result: Result<Resolution, ResolveError>) -> Self {
        let outcome = match result {
            Ok(resolution) => UrlOutcome::Resolved(resolution),
            Err(error) => UrlOutcome::Failed(UrlFailure::from(&error)),
        };
        Self {
            url: url.into(),
            outcome,
        }
    }

    /// Returns the resolution, if a service handled the URL.
    #[must_use]
    pub const fn resolution(&self) -> Option<&Resolution> {
        match &self.outcome {
            UrlOutcome::Resolved(resolution) => Some(resolution),
            UrlOutcome::Failed(_) => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&UrlFailure> {
        match &self.outcome {
            UrlOutcome::Failed(failure) => Some(failure),
            UrlOutcome::Resolved(_) => None,
        }
    }

    /// Returns true if resolution failed. A missing item is not a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, UrlOutcome::Failed(_))
    }
}

/// Counts over a batch of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// URLs resolved to images.
    pub found: usize,
    /// URLs whose item does not exist.
    pub not_found: usize,
    /// URLs that failed.
    pub errors: usize,
}

impl BatchSummary {
    /// Tallies a batch.
    #[must_use]
    pub fn from_reports(reports: &[UrlReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            match report.resolution() {
                Some(resolution) if resolution.is_found() => summary.found += 1,
                Some(_) => summary.not_found += 1,
                None => summary.errors += 1,
            }
            summary
        })
    }

    /// Returns true if any URL failed.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} found, {} not found, {} failed",
            self.found, self.not_found, self.errors
        )
    }
}
