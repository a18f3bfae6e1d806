use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod certificate;
pub mod config;
pub mod document;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Certificate not found")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new(message)
    }
}

/// Register the versioned API surface. Shared between `run()` and the
/// integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::resource("/certificates/generateCertificate")
                    .route(web::post().to(certificate::handlers::generate_certificate)),
            )
            .service(
                web::resource("/certificates/download/{certificateId}")
                    .route(web::get().to(certificate::handlers::download_certificate)),
            )
            .service(
                web::resource("/services/generateService")
                    .route(web::post().to(service::handlers::generate_service)),
            )
            .service(
                web::resource("/services/download/{serviceId}")
                    .route(web::get().to(service::handlers::download_service)),
            ),
    );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::certificate::handlers::generate_certificate,
            crate::certificate::handlers::download_certificate,
            crate::service::handlers::generate_service,
            crate::service::handlers::download_service,
        ),
        components(
            schemas(
                certificate::models::CreateCertificateRequest,
                certificate::models::Observation,
                certificate::handlers::CertificateResponse,
                service::models::CreateServiceRequest,
                service::models::EngineerRemarkInput,
                service::handlers::ServiceResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Certificate Service", description = "Calibration certificate endpoints."),
            (name = "Service Report Service", description = "Service report endpoints.")
        )
    )]
    struct ApiDoc;

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let extra_origin = config.cors_allowed_origin.clone();
    let app_state = web::Data::new(AppState::new(config));

    let prometheus = PrometheusMetricsBuilder::new("sprier_cert_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");
    prometheus
        .registry
        .register(Box::new(app_state.metrics.documents_generated.clone()))
        .expect("Failed to register documents_generated_total counter");

    log::info!("Starting server at http://{bind_addr}:{port}");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let mut cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);
        if let Some(origin) = &extra_origin {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
