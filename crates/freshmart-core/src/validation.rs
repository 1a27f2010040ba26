//! # Validation Module
//!
//! Input validation utilities for the Freshmart backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (FormState rules)                                 │
//! │  ├── Per-field rules built from THIS MODULE's predicates               │
//! │  └── Immediate feedback, errors shown inline                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API boundary (Rust)                                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0)                                          │
//! │                                                                         │
//! │  NOT covered at layer 3: the 5-banner cap and the one-tag minimum.     │
//! │  Those live at layers 1-2 only (known gap under concurrent admins).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freshmart_core::validation::{validate_internal_link, validate_tags};
//!
//! validate_internal_link("/products/rice").unwrap();
//! validate_tags(&["Rice".to_string()]).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a banner title.
///
/// Same shape as [`validate_product_name`] but with a tighter cap since
/// titles overlay the carousel image.
pub fn validate_banner_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a product or banner description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 2000 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 2000 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 2000,
        });
    }

    Ok(())
}

/// Validates a banner's internal navigation link.
///
/// ## Rules
/// - Must start with `/`
/// - May contain only letters, digits, `_`, `-`, and further `/` segments
///
/// ## Example
/// ```rust
/// use freshmart_core::validation::validate_internal_link;
///
/// assert!(validate_internal_link("/products/rice").is_ok());
/// assert!(validate_internal_link("products/rice").is_err()); // no leading slash
/// assert!(validate_internal_link("https://other.shop").is_err());
/// ```
pub fn validate_internal_link(link: &str) -> ValidationResult<()> {
    let link = link.trim();

    if link.is_empty() {
        return Err(ValidationError::Required {
            field: "link".to_string(),
        });
    }

    let valid = link.starts_with('/')
        && link[1..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '/');

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "link".to_string(),
            reason: "must be an internal path like /products/rice".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address for sign-in.
///
/// Intentionally loose: one `@`, a non-empty local part, and a domain with
/// a dot. The authentication layer is the real arbiter.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stored price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is a legal stored price
///
/// The admin form additionally requires a strictly positive price before
/// submit; that stricter rule lives in the form layer.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an image upload size against a per-kind cap.
///
/// ## Example
/// ```rust
/// use freshmart_core::validation::validate_image_size;
/// use freshmart_core::MAX_PRODUCT_IMAGE_BYTES;
///
/// assert!(validate_image_size(1024, MAX_PRODUCT_IMAGE_BYTES).is_ok());
/// assert!(validate_image_size(MAX_PRODUCT_IMAGE_BYTES + 1, MAX_PRODUCT_IMAGE_BYTES).is_err());
/// ```
pub fn validate_image_size(len: usize, max_bytes: usize) -> ValidationResult<()> {
    if len == 0 {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if len > max_bytes {
        return Err(ValidationError::TooLarge {
            field: "image".to_string(),
            max_bytes,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a product's tag list.
///
/// ## Rules
/// - At least one tag (UI-level invariant; the database does not enforce it)
/// - Each tag non-empty after trimming, at most 50 characters
pub fn validate_tags(tags: &[String]) -> ValidationResult<()> {
    if tags.is_empty() {
        return Err(ValidationError::Empty {
            field: "tag".to_string(),
        });
    }

    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::Required {
                field: "tag".to_string(),
            });
        }
        if tag.len() > 50 {
            return Err(ValidationError::TooLong {
                field: "tag".to_string(),
                max: 50,
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a record identifier.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Basmati Rice 5kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_internal_link() {
        assert!(validate_internal_link("/products/rice").is_ok());
        assert!(validate_internal_link("/").is_ok());
        assert!(validate_internal_link("/weekly-deals").is_ok());

        // Missing leading slash
        assert!(validate_internal_link("products/rice").is_err());
        // External URLs are not internal links
        assert!(validate_internal_link("https://example.com").is_err());
        assert!(validate_internal_link("/deals?week=1").is_err());
        assert!(validate_internal_link("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@freshmart.example").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@missing-local.example").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&["Rice".to_string()]).is_ok());
        assert!(validate_tags(&[]).is_err());
        assert!(validate_tags(&["".to_string()]).is_err());
        assert!(validate_tags(&["A".repeat(60)]).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  rice  ").unwrap(), "rice");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_image_size() {
        assert!(validate_image_size(1, 100).is_ok());
        assert!(validate_image_size(100, 100).is_ok());
        assert!(validate_image_size(101, 100).is_err());
        assert!(validate_image_size(0, 100).is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("not-a-uuid").is_err());
    }
}
