//! Shared traits and field validators for ledger entities.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

pub(crate) const MAX_EMAIL_LEN: usize = 255;

/// Rejects the nil UUID for required references.
pub(crate) fn require_id(id: Uuid, field: &str) -> DomainResult<Uuid> {
    if id.is_nil() {
        return Err(DomainError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(id)
}

/// Trims and checks a text field against inclusive length bounds.
pub(crate) fn bounded_text(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min || trimmed.chars().count() > max {
        return Err(DomainError::InvalidArgument(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(trimmed.to_string())
}

/// Trims, lowercases, and pattern-checks an email address.
pub(crate) fn normalize_email(raw: &str) -> DomainResult<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() || normalized.chars().count() > MAX_EMAIL_LEN {
        return Err(DomainError::InvalidArgument(
            "email must be non-empty and at most 255 characters".into(),
        ));
    }
    if !EMAIL_RE.is_match(&normalized) {
        return Err(DomainError::InvalidArgument(format!(
            "`{}` is not a valid email address",
            normalized
        )));
    }
    Ok(normalized)
}

/// Accepts `#RGB` or `#RRGGBB` hex color codes.
pub(crate) fn validate_color(value: &str) -> DomainResult<()> {
    if !HEX_COLOR_RE.is_match(value) {
        return Err(DomainError::InvalidArgument(format!(
            "`{}` is not a valid hex color",
            value
        )));
    }
    Ok(())
}
