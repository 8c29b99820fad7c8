// storefront_app/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use storefront::model::{LineRequest, Order};

#[derive(Deserialize, Debug)]
pub struct PlaceOrderPayload {
  pub order_items: Vec<LineRequest>,
}

/// Fetches an order and hides it unless it belongs to `user_id`.
async fn owned_order(app_state: &AppState, order_id: Uuid, user_id: Uuid) -> Result<Order, AppError> {
  let order = app_state.placement.get_order(order_id).await?;
  if order.user_id != user_id {
    warn!(%order_id, owner = %order.user_id, "Order requested by a different user.");
    return Err(AppError::NotFound(format!("order {} not found", order_id)));
  }
  Ok(order)
}

#[instrument(
    name = "handler::place_order",
    skip(app_state, auth_user, req_payload),
    fields(user_id = %auth_user.user_id, line_count = req_payload.order_items.len())
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<PlaceOrderPayload>,
) -> Result<HttpResponse, AppError> {
  let lines = req_payload.into_inner().order_items;
  let order = app_state.placement.place_order(auth_user.user_id, lines).await?;
  info!(order_id = %order.id, total_price = %order.total_price, "Order created.");
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::list_orders", skip_all, fields(user_id = %auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.placement.list_orders_for_user(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip_all, fields(user_id = %auth_user.user_id, order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order = owned_order(&app_state, path.into_inner(), auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(order))
}

/// Deletes the caller's order and its lines. Reserved stock stays taken.
#[instrument(name = "handler::delete_order", skip_all, fields(user_id = %auth_user.user_id, order_id = %path.as_ref()))]
pub async fn delete_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order = owned_order(&app_state, path.into_inner(), auth_user.user_id).await?;
  app_state.placement.delete_order(order.id).await?;
  info!("Order deleted.");
  Ok(HttpResponse::NoContent().finish())
}
