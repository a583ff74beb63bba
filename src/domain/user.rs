//! User entity and its lifecycle rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{bounded_text, normalize_email, Identifiable};
use crate::errors::{DomainError, DomainResult};

const MIN_PASSWORD_HASH_LEN: usize = 32;

/// Account holder. Starts active with an unconfirmed email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    email_confirmed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(email)?,
            password_hash: validate_password_hash(password_hash)?,
            first_name: bounded_text(first_name, "first name", 2, 100)?,
            last_name: bounded_text(last_name, "last name", 2, 100)?,
            is_active: true,
            email_confirmed: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn update_password(&mut self, password_hash: &str) -> DomainResult<()> {
        self.password_hash = validate_password_hash(password_hash)?;
        self.touch();
        Ok(())
    }

    pub fn update_name(&mut self, first_name: &str, last_name: &str) -> DomainResult<()> {
        let first = bounded_text(first_name, "first name", 2, 100)?;
        let last = bounded_text(last_name, "last name", 2, 100)?;
        self.first_name = first;
        self.last_name = last;
        self.touch();
        Ok(())
    }

    pub fn confirm_email(&mut self) -> DomainResult<()> {
        if self.email_confirmed {
            return Err(DomainError::InvalidOperation(
                "email is already confirmed".into(),
            ));
        }
        self.email_confirmed = true;
        self.touch();
        Ok(())
    }

    /// Stamps a successful login. Requires an active, confirmed user.
    pub fn record_login(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::InvalidOperation(
                "cannot record a login for an inactive user".into(),
            ));
        }
        if !self.email_confirmed {
            return Err(DomainError::InvalidOperation(
                "cannot record a login before the email is confirmed".into(),
            ));
        }
        self.last_login_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::InvalidOperation("user is already active".into()));
        }
        self.is_active = true;
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::InvalidOperation(
                "user is already inactive".into(),
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

impl Identifiable for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn validate_password_hash(hash: &str) -> DomainResult<String> {
    if hash.chars().count() < MIN_PASSWORD_HASH_LEN {
        return Err(DomainError::InvalidArgument(format!(
            "password hash must be at least {} characters",
            MIN_PASSWORD_HASH_LEN
        )));
    }
    Ok(hash.to_string())
}
