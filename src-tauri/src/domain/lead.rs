//! Lead Entity
//!
//! A sales prospect moving through the pipeline stages.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainError, DomainResult, Entity};
use super::status::LeadStatus;

/// A sales lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: u32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    /// Where the lead came from (referral, website, ...)
    pub source: Option<String>,
    /// Estimated deal value
    pub value: f64,
    /// Assigned user id
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Lead {
    /// Create a new lead in the default stage
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            email: None,
            phone: None,
            company: None,
            status: LeadStatus::default(),
            source: None,
            value: 0.0,
            assigned_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(DomainError::InvalidInput(format!("value must be a non-negative number, got {}", self.value)));
        }
        Ok(())
    }
}

impl Entity for Lead {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Loose shape check: something@domain.tld
fn validate_email(email: &str) -> DomainResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("invalid email '{}'", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults() {
        let lead = Lead::new(0, "Acme".to_string());
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.value, 0.0);
        assert!(lead.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let blank = Lead::new(0, "  ".to_string());
        assert!(matches!(blank.validate(), Err(DomainError::InvalidInput(_))));

        let mut lead = Lead::new(0, "Acme".to_string());
        lead.email = Some("not-an-email".to_string());
        assert!(lead.validate().is_err());

        lead.email = Some("sales@acme.io".to_string());
        lead.value = -5.0;
        assert!(lead.validate().is_err());
    }
}
