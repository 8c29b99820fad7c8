// storefront_app/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::endpoints::ResourceEndpoint;
use crate::web::handlers::{order_handlers, resource_handlers};
use storefront::model::{Category, Product, ProductImage, Review, User};

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "backend": app_state.config.backend_name() }))
}

/// `GET/POST ""` and `GET/PUT/DELETE /{id}` for one catalog resource.
fn resource_scope<R: ResourceEndpoint>() -> actix_web::Scope {
  web::scope(R::PATH)
    .service(
      web::resource("")
        .route(web::get().to(resource_handlers::list_handler::<R>))
        .route(web::post().to(resource_handlers::create_handler::<R>)),
    )
    .service(
      web::resource("/{id}")
        .route(web::get().to(resource_handlers::get_handler::<R>))
        .route(web::put().to(resource_handlers::update_handler::<R>))
        .route(web::delete().to(resource_handlers::delete_handler::<R>)),
    )
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  // Malformed JSON bodies get the same error shape as every other 400.
  let json_config =
    web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(format!("Invalid request body: {}", err)).into());

  cfg.service(
    web::scope("/api/v1")
      .app_data(json_config)
      .route("/health", web::get().to(health_check_handler))
      .service(resource_scope::<Category>())
      .service(resource_scope::<Product>())
      .service(resource_scope::<Review>())
      .service(resource_scope::<ProductImage>())
      .service(resource_scope::<User>())
      .service(
        web::scope("/orders")
          .service(
            web::resource("")
              .route(web::get().to(order_handlers::list_orders_handler))
              .route(web::post().to(order_handlers::place_order_handler)),
          )
          .service(
            web::resource("/{id}")
              .route(web::get().to(order_handlers::get_order_handler))
              .route(web::delete().to(order_handlers::delete_order_handler)),
          ),
      ),
  );
}
