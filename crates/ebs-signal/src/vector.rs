//! Stakeholder input vectors
//!
//! A [`Vector`] is one stakeholder role's free-text input to a diagnostic
//! session. Vectors are immutable inputs; the pipeline never mutates them.

use serde::{Deserialize, Serialize};

/// One role-tagged free-text stakeholder input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector {
    /// Intake record identifier (opaque to the pipeline)
    pub id: String,
    /// Owning tenant
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    /// Role category, e.g. `owner`, `sales`, `ops`, `delivery`
    #[serde(rename = "roleType")]
    pub role_type: String,
    /// Human-facing role label
    #[serde(rename = "roleLabel")]
    pub role_label: String,
    /// Free-text description of perceived operating constraints
    #[serde(rename = "perceivedConstraints")]
    pub perceived_constraints: String,
}

impl Vector {
    /// Create a new vector
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        role_type: impl Into<String>,
        perceived_constraints: impl Into<String>,
    ) -> Self {
        let role_type = role_type.into();
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            role_label: role_type.clone(),
            role_type,
            perceived_constraints: perceived_constraints.into(),
        }
    }

    /// With a human-facing role label distinct from the role type
    #[inline]
    #[must_use]
    pub fn with_role_label(mut self, label: impl Into<String>) -> Self {
        self.role_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_label_to_role_type() {
        let v = Vector::new("v-1", "t-1", "ops", "approvals stall");
        assert_eq!(v.role_label, "ops");
    }

    #[test]
    fn wire_field_names() {
        let v = Vector::new("v-1", "t-1", "ops", "approvals stall")
            .with_role_label("Operations Lead");
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("tenantId").is_some());
        assert!(json.get("roleType").is_some());
        assert!(json.get("perceivedConstraints").is_some());
        assert_eq!(json["roleLabel"], "Operations Lead");
    }
}
