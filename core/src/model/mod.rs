// storefront/src/model/mod.rs

//! Data structures for every storefront entity, their draft (create/replace)
//! inputs and the field rules each draft must satisfy.

pub mod category;
pub mod order;
pub mod product;
pub mod product_image;
pub mod review;
pub mod user;

pub use category::{Category, CategoryDraft};
pub use order::{LineRequest, Order, OrderLine, OrderState};
pub use product::{Product, ProductDraft, ProductSnapshot};
pub use product_image::{ProductImage, ProductImageDraft};
pub use review::{Review, ReviewDraft};
pub use user::{User, UserDraft};

use crate::error::ValidationError;

pub(crate) const MAX_URL_LEN: usize = 500;

/// Checks a character-count range on an already trimmed string.
pub(crate) fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
  let len = value.chars().count();
  if len < min {
    return Err(ValidationError::new(
      field,
      format!("must be at least {} characters long", min),
    ));
  }
  if len > max {
    return Err(ValidationError::new(field, format!("must be at most {} characters long", max)));
  }
  Ok(())
}

/// Accepts absolute http(s) URLs up to `MAX_URL_LEN` characters.
pub(crate) fn check_url(field: &str, value: &str) -> Result<(), ValidationError> {
  if value.len() > MAX_URL_LEN {
    return Err(ValidationError::new(
      field,
      format!("must be at most {} characters long", MAX_URL_LEN),
    ));
  }
  let rest = value
    .strip_prefix("https://")
    .or_else(|| value.strip_prefix("http://"))
    .ok_or_else(|| ValidationError::new(field, "must be an http(s) URL"))?;
  if rest.is_empty() || rest.starts_with('/') || rest.chars().any(char::is_whitespace) {
    return Err(ValidationError::new(field, "must be an http(s) URL"));
  }
  Ok(())
}
