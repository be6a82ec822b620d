//! Document lifecycle, verification, and acquisition enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Registered, not yet picked up for extraction.
    #[default]
    Pending,
    /// Extraction in progress.
    Processing,
    /// Extraction finished; counts towards aggregate metrics.
    Completed,
    /// Extraction failed. A retry may re-enter `Processing`.
    Error,
    /// Retired from active reporting.
    Archived,
}

impl DocumentStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Error,
        Self::Archived,
    ];

    /// Whether the strict lifecycle allows moving from `self` to `next`.
    ///
    /// Writing the current status again is always allowed.
    pub fn can_transition_to(&self, next: Self) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Pending, Self::Error)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Error)
                | (Self::Error, Self::Processing)
                | (Self::Completed, Self::Archived)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown document status '{s}'"))
    }
}

/// Review outcome of a document's extracted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Reviewed and accepted.
    Verified,
    /// Awaiting review.
    #[default]
    Pending,
    /// Marked for a second look.
    Flagged,
    /// Reviewed and refused.
    Rejected,
}

impl VerificationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Flagged => "flagged",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verified" => Ok(Self::Verified),
            "pending" => Ok(Self::Pending),
            "flagged" => Ok(Self::Flagged),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("unknown verification status '{s}'")),
        }
    }
}

/// How a document entered the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMethod {
    /// File picker or drag-and-drop upload.
    File,
    /// Photo taken with a device camera.
    Camera,
    /// Programmatic submission.
    Api,
    /// Typed in by hand.
    Manual,
}

impl UploadMethod {
    /// Return the method as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Camera => "camera",
            Self::Api => "api",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
