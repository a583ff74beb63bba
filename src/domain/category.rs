//! Category entity for classifying ledger activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{bounded_text, require_id, validate_color, Identifiable, NamedEntity};
use crate::errors::{DomainError, DomainResult};

const MAX_DESCRIPTION_LEN: usize = 500;

/// User-defined spending/income category, optionally nested one level
/// under a parent category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    id: Uuid,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: &str, user_id: Uuid) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: bounded_text(name, "category name", 2, 100)?,
            description: None,
            user_id: require_id(user_id, "user id")?,
            parent_id: None,
            icon: None,
            color: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_description(mut self, description: &str) -> DomainResult<Self> {
        self.description = Some(validate_description(description)?);
        Ok(self)
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> DomainResult<Self> {
        self.set_parent(Some(parent_id))?;
        Ok(self)
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_color(mut self, color: &str) -> DomainResult<Self> {
        validate_color(color)?;
        self.color = Some(color.to_string());
        Ok(self)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = bounded_text(name, "category name", 2, 100)?;
        self.touch();
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<&str>) -> DomainResult<()> {
        self.description = match description {
            Some(text) => Some(validate_description(text)?),
            None => None,
        };
        self.touch();
        Ok(())
    }

    pub fn update_icon(&mut self, icon: Option<&str>) {
        self.icon = icon.map(str::to_string);
        self.touch();
    }

    pub fn update_color(&mut self, color: Option<&str>) -> DomainResult<()> {
        if let Some(value) = color {
            validate_color(value)?;
        }
        self.color = color.map(str::to_string);
        self.touch();
        Ok(())
    }

    pub fn set_parent(&mut self, parent_id: Option<Uuid>) -> DomainResult<()> {
        if let Some(parent) = parent_id {
            require_id(parent, "parent category id")?;
            if parent == self.id {
                return Err(DomainError::SelfParent);
            }
        }
        self.parent_id = parent_id;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::InvalidOperation(
                "category is already active".into(),
            ));
        }
        self.is_active = true;
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::InvalidOperation(
                "category is already inactive".into(),
            ));
        }
        self.is_active = false;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

fn validate_description(description: &str) -> DomainResult<String> {
    bounded_text(description, "category description", 0, MAX_DESCRIPTION_LEN)
}
