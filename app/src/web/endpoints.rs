// storefront_app/src/web/endpoints.rs

//! Binds each catalog resource to its URL, its JSON input and its repository
//! so one set of generic handlers can serve all of them.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront::model::{
  Category, CategoryDraft, Product, ProductDraft, ProductImage, ProductImageDraft, Review, ReviewDraft, User,
  UserDraft,
};
use storefront::{Repository, Resource};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

pub trait ResourceEndpoint: Resource + Serialize {
  /// Request body of `POST` and `PUT`.
  type Payload: DeserializeOwned + Send + 'static;

  /// Scope under `/api/v1`.
  const PATH: &'static str;

  /// Whether `GET` needs an authenticated caller. Writes always do.
  const READ_REQUIRES_AUTH: bool = false;

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>>;

  /// Turns a request body into a draft. `caller` is the authenticated user.
  fn into_draft(payload: Self::Payload, caller: Uuid) -> Result<Self::Draft, AppError>;
}

impl ResourceEndpoint for Category {
  type Payload = CategoryDraft;
  const PATH: &'static str = "/categories";

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
    state.categories.clone()
  }

  fn into_draft(payload: CategoryDraft, _caller: Uuid) -> Result<CategoryDraft, AppError> {
    Ok(payload)
  }
}

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: Decimal,
  pub category: Uuid,
  /// Opening stock. Replacing a product leaves its stock to the ledger.
  pub stock_quantity: i32,
  #[serde(default)]
  pub image_url: String,
}

impl ResourceEndpoint for Product {
  type Payload = ProductPayload;
  const PATH: &'static str = "/products";

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
    state.products.clone()
  }

  /// The caller becomes the owner on create; updates keep the original owner.
  fn into_draft(payload: ProductPayload, caller: Uuid) -> Result<ProductDraft, AppError> {
    Ok(ProductDraft {
      name: payload.name,
      description: payload.description,
      price: payload.price,
      category_id: payload.category,
      stock_quantity: payload.stock_quantity,
      image_url: payload.image_url,
      created_by: caller,
    })
  }
}

#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
  pub product: Uuid,
  pub rating: i32,
  #[serde(default)]
  pub review_content: String,
}

impl ResourceEndpoint for Review {
  type Payload = ReviewPayload;
  const PATH: &'static str = "/reviews";

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
    state.reviews.clone()
  }

  fn into_draft(payload: ReviewPayload, caller: Uuid) -> Result<ReviewDraft, AppError> {
    Ok(ReviewDraft {
      product_id: payload.product,
      user_id: caller,
      rating: payload.rating,
      review_content: payload.review_content,
    })
  }
}

impl ResourceEndpoint for ProductImage {
  type Payload = ProductImageDraft;
  const PATH: &'static str = "/product-images";

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
    state.product_images.clone()
  }

  fn into_draft(payload: ProductImageDraft, _caller: Uuid) -> Result<ProductImageDraft, AppError> {
    Ok(payload)
  }
}

#[derive(Deserialize)]
pub struct UserPayload {
  pub username: String,
  pub email: String,
  /// Required on create. A `PUT` without it keeps the current password.
  #[serde(default)]
  pub password: Option<String>,
}

impl ResourceEndpoint for User {
  type Payload = UserPayload;
  const PATH: &'static str = "/users";
  const READ_REQUIRES_AUTH: bool = true;

  fn repository(state: &AppState) -> Arc<dyn Repository<Self>> {
    state.users.clone()
  }

  fn into_draft(payload: UserPayload, _caller: Uuid) -> Result<UserDraft, AppError> {
    Ok(UserDraft {
      username: payload.username,
      email: payload.email,
      password_hash: payload.password.as_deref().map(auth_service::hash_password).transpose()?,
    })
  }
}
