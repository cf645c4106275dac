//! Security response headers.
//!
//! The core has no transport of its own, so [`SecurityHeaders`] does not
//! touch any HTTP types — it is a plain list of `(name, value)` pairs that a
//! transport can apply to its own response type. Regulated deployments get a
//! stricter `Content-Security-Policy` and HSTS `max-age`.

use super::profiles::SecurityProfile;

/// Resolved set of security response headers for a [`SecurityProfile`].
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    pairs: Vec<(&'static str, String)>,
}

impl SecurityHeaders {
    /// Build the header set for the given profile.
    #[must_use]
    pub fn for_profile(profile: SecurityProfile) -> Self {
        let mut pairs = vec![
            ("X-Content-Type-Options", "nosniff".to_string()),
            ("X-Frame-Options", "DENY".to_string()),
            (
                "Referrer-Policy",
                "strict-origin-when-cross-origin".to_string(),
            ),
        ];

        match profile {
            SecurityProfile::Standard => {
                pairs.push((
                    "Strict-Transport-Security",
                    "max-age=15552000".to_string(),
                ));
                pairs.push(("Content-Security-Policy", "default-src 'self'".to_string()));
            }
            SecurityProfile::Regulated => {
                pairs.push((
                    "Strict-Transport-Security",
                    "max-age=31536000; includeSubDomains; preload".to_string(),
                ));
                pairs.push((
                    "Content-Security-Policy",
                    "default-src 'none'; frame-ancestors 'none'".to_string(),
                ));
                pairs.push(("Cache-Control", "no-store".to_string()));
            }
        }

        Self { pairs }
    }

    /// Iterate the `(name, value)` pairs a transport should apply.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pairs.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Look up a single header value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
