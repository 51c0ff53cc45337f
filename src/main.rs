pub mod api;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::multimedia;

use crate::api::openapi::ApiDoc;
use crate::multimedia::adapter::outgoing::cloud_storage::{CloudinaryConfig, CloudinaryStorage};
use crate::multimedia::application::domain::policies::upload_policy::UploadPolicy;
use crate::multimedia::application::media_use_cases::MultimediaUseCases;
use crate::multimedia::application::ports::incoming::services::UploadMediaService;
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpServer};
use std::env;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub multimedia: MultimediaUseCases,
    pub multimedia_upload_policy: UploadPolicy,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting media upload service...");

    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    let cloudinary_config = CloudinaryConfig::from_env();
    let storage =
        CloudinaryStorage::new(cloudinary_config).expect("Failed to build media storage client");
    if !storage.config().has_credentials() {
        warn!("Media host credentials are incomplete; uploads will be rejected");
    }
    info!(
        cloud_name = %storage.config().cloud_name,
        signature_algorithm = ?storage.config().signature_algorithm,
        "media storage ready"
    );

    let upload_policy = UploadPolicy::from_env();
    info!(
        folder_namespace = %upload_policy.folder_namespace,
        max_file_size_bytes = upload_policy.max_file_size_bytes,
        "upload policy loaded"
    );

    let state = AppState {
        multimedia: MultimediaUseCases {
            upload_media: Arc::new(UploadMediaService::new(storage)),
        },
        multimedia_upload_policy: upload_policy,
    };

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(crate::health::health);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::upload_media_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::preview_upload_policy_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
