//! Security posture profiles.
//!
//! A [`SecurityProfile`] selects the strictness of the ambient security
//! checks (field masking, TLS posture, audit verbosity) without requiring a
//! schema recompile. It does not replace the compiled authorization rules
//! from the schema compiler — it governs the defense-in-depth layer that
//! applies uniformly regardless of what a given type/field rule says.

use std::fmt;

/// Security posture for the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecurityProfile {
    /// Baseline posture: compiled authorization rules apply, no additional
    /// masking of sensitive-looking fields.
    #[default]
    Standard,
    /// Stricter posture for regulated deployments: sensitive/PII/secret
    /// fields are masked even when not explicitly marked in the schema.
    Regulated,
}

impl SecurityProfile {
    /// The standard profile.
    #[must_use]
    pub const fn standard() -> Self {
        Self::Standard
    }

    /// The regulated profile.
    #[must_use]
    pub const fn regulated() -> Self {
        Self::Regulated
    }

    /// Whether this profile is the regulated posture.
    #[must_use]
    pub const fn is_regulated(self) -> bool {
        matches!(self, Self::Regulated)
    }
}

impl fmt::Display for SecurityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Regulated => write!(f, "regulated"),
        }
    }
}
