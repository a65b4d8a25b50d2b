use crate::models::TableShape;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while collecting a stats table.
///
/// None of these are recovered from inside the crate; callers decide whether
/// to bail out (the CLI does) or try again.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("unsupported season `{0}` (expected 2010-2011 through 2018-2019)")]
    UnsupportedSeason(String),

    #[error("element `{locator}` not found after waiting {waited:?}")]
    NavigationTimeout { locator: String, waited: Duration },

    #[error("malformed {shape} table at line {line}: {reason}")]
    MalformedTable {
        shape: TableShape,
        line: usize,
        reason: String,
    },

    #[error("could not normalize date `{0}`")]
    InvalidDate(String),

    #[error("browser command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),

    #[error("could not start WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),
}

impl StatsError {
    pub(crate) fn malformed(shape: TableShape, line: usize, reason: impl Into<String>) -> Self {
        StatsError::MalformedTable {
            shape,
            line,
            reason: reason.into(),
        }
    }

    /// True when the error means a page element never showed up.
    pub fn is_navigation_timeout(&self) -> bool {
        matches!(self, StatsError::NavigationTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
