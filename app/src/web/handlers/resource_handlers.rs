// storefront_app/src/web/handlers/resource_handlers.rs

//! CRUD handlers shared by every catalog resource.

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::endpoints::ResourceEndpoint;
use crate::web::extractors::AuthenticatedUser;

fn ensure_read_allowed<R: ResourceEndpoint>(caller: &Option<AuthenticatedUser>) -> Result<(), AppError> {
  if R::READ_REQUIRES_AUTH && caller.is_none() {
    return Err(AppError::Auth(format!(
      "Reading {} records requires an authenticated caller.",
      R::NAME
    )));
  }
  Ok(())
}

#[instrument(name = "handler::list_resources", skip_all, fields(resource = R::NAME))]
pub async fn list_handler<R: ResourceEndpoint>(
  app_state: web::Data<AppState>,
  caller: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
  ensure_read_allowed::<R>(&caller)?;
  let records = R::repository(&app_state).list().await?;
  Ok(HttpResponse::Ok().json(records))
}

#[instrument(name = "handler::get_resource", skip_all, fields(resource = R::NAME, id = %path.as_ref()))]
pub async fn get_handler<R: ResourceEndpoint>(
  app_state: web::Data<AppState>,
  caller: Option<AuthenticatedUser>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  ensure_read_allowed::<R>(&caller)?;
  let record = R::repository(&app_state).get(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(record))
}

#[instrument(name = "handler::create_resource", skip_all, fields(resource = R::NAME, caller = %auth_user.user_id))]
pub async fn create_handler<R: ResourceEndpoint>(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  payload: web::Json<R::Payload>,
) -> Result<HttpResponse, AppError> {
  let draft = R::into_draft(payload.into_inner(), auth_user.user_id)?;
  let record = R::repository(&app_state).create(draft).await?;
  info!(id = %record.id(), "Resource created.");
  Ok(HttpResponse::Created().json(record))
}

#[instrument(name = "handler::update_resource", skip_all, fields(resource = R::NAME, id = %path.as_ref(), caller = %auth_user.user_id))]
pub async fn update_handler<R: ResourceEndpoint>(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
  payload: web::Json<R::Payload>,
) -> Result<HttpResponse, AppError> {
  let draft = R::into_draft(payload.into_inner(), auth_user.user_id)?;
  let record = R::repository(&app_state).update(path.into_inner(), draft).await?;
  Ok(HttpResponse::Ok().json(record))
}

#[instrument(name = "handler::delete_resource", skip_all, fields(resource = R::NAME, id = %path.as_ref(), caller = %auth_user.user_id))]
pub async fn delete_handler<R: ResourceEndpoint>(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  R::repository(&app_state).delete(id).await?;
  info!("Resource deleted.");
  Ok(HttpResponse::NoContent().finish())
}
