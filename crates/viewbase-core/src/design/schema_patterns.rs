//! Schema design rules
//!
//! Detects schema-related issues:
//! - Type organization recommendations
//! - Field design anti-patterns
//! - Interface/union usage suggestions

use super::DesignAudit;
use serde_json::Value;

/// Analyze schema patterns
pub fn analyze(schema: &Value, audit: &mut DesignAudit) {
    check_type_organization(schema, audit);
    check_field_design_patterns(schema, audit);
}

/// Check type organization recommendations
fn check_type_organization(schema: &Value, _audit: &mut DesignAudit) {
    if let Some(_types) = schema.get("types").and_then(|v| v.as_array()) {
        // Placeholder for future type organization checks
    }
}

/// Check for field design anti-patterns
fn check_field_design_patterns(schema: &Value, _audit: &mut DesignAudit) {
    if let Some(_types) = schema.get("types").and_then(|v| v.as_array()) {
        // Placeholder for future field design checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_analyze_empty_schema() {
        let schema = serde_json::json!({});
        let mut audit = DesignAudit::new();
        analyze(&schema, &mut audit);
        // Should not panic
    }
}
