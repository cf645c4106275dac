//! Security features: authorization evaluation and audit infrastructure.
//!
//! This module provides the security infrastructure that sits between the
//! runtime executor and the database:
//! - Security profiles (STANDARD, REGULATED)
//! - Inbound auth-context extraction (bearer token → [`AuthenticatedUser`])
//! - Sensitive field masking for PII/regulated data
//! - Security error types
//! - Query validation (depth, complexity)
//! - Audit logging
//! - Introspection control
//! - Error formatting
//!
//! Verifying a token's cryptographic signature against an identity provider
//! (OIDC/JWKS) and the actual TLS handshake are the responsibility of the
//! external transport the compiled engine is embedded in; this crate only
//! carries the posture types (required version, mTLS) and the resulting
//! pass/fail decision so they can feed the same error taxonomy and audit log
//! as every other security check.

pub mod audit;
pub mod auth_middleware;
pub mod error_formatter;
pub mod errors;
pub mod field_filter;
pub mod field_masking;
pub mod headers;
pub mod introspection_enforcer;
pub mod profiles;
pub mod query_validator;
pub mod rls_policy;
pub mod security_context;
pub mod tls_enforcer;
pub mod validation_audit;

// Re-export key types for convenience
pub use audit::{AuditEntry, AuditLevel, AuditLogger, AuditStats};
pub use auth_middleware::{AuthConfig, AuthMiddleware, AuthRequest, AuthenticatedUser};
pub use error_formatter::{DetailLevel, ErrorFormatter};
pub use errors::{Result, SecurityError};
pub use field_filter::{FieldAccessError, FieldFilter, FieldFilterBuilder, FieldFilterConfig};
pub use field_masking::{FieldMasker, FieldSensitivity};
pub use headers::SecurityHeaders;
pub use introspection_enforcer::{IntrospectionEnforcer, IntrospectionPolicy};
pub use profiles::SecurityProfile;
pub use query_validator::{QueryMetrics, QueryValidator, QueryValidatorConfig};
pub use rls_policy::{CompiledRLSPolicy, DefaultRLSPolicy, NoRLSPolicy, RLSPolicy, RLSRule};
pub use security_context::SecurityContext;
pub use tls_enforcer::{TlsConfig, TlsConnection, TlsEnforcer, TlsVersion};
pub use validation_audit::{
    RedactionPolicy, ValidationAuditEntry, ValidationAuditLogger, ValidationAuditLoggerConfig,
};
