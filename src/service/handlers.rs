use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, info};
use sanitize_filename::sanitize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::document;
use crate::service::models::CreateServiceRequest;
use crate::{AppState, ErrorResponse};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    #[schema(example = "Service generated successfully!")]
    pub message: String,
    #[schema(example = "SERV-f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub service_id: String,
    #[schema(example = "/api/v1/services/download/SERV-f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub download_url: String,
}

#[utoipa::path(
    context_path = "/api/v1",
    tag = "Service Report Service",
    post,
    path = "/services/generateService",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service report created and rendered", body = ServiceResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Persistence or render failure", body = ErrorResponse)
    )
)]
pub async fn generate_service(
    req: web::Json<CreateServiceRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let new = match req.into_inner().into_new() {
        Ok(new) => new,
        Err(message) => {
            error!("service submission rejected: {message}");
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    let service = match data.store.save_service(new) {
        Ok(service) => service,
        Err(e) => {
            error!("failed to persist service report: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                &format!("Failed to generate service: {e}"),
            ));
        }
    };

    let generated_on = document::common::generation_timestamp();
    let layout = document::service::layout(&service, data.config.logo(), &generated_on);
    let output = data.config.service_path(&service.service_id);

    if let Err(e) = data.renderer.render(&layout, &output) {
        error!("render failed for service {}: {e}", service.service_id);
        data.store.remove_service(&service.service_id);
        return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
            &format!("Failed to generate service: {e}"),
        ));
    }

    data.metrics
        .documents_generated
        .with_label_values(&["service"])
        .inc();
    info!(
        "service report {} rendered to {}",
        service.service_id,
        output.display()
    );

    HttpResponse::Created().json(ServiceResponse {
        message: "Service generated successfully!".to_string(),
        download_url: format!("/api/v1/services/download/{}", service.service_id),
        service_id: service.service_id,
    })
}

#[utoipa::path(
    context_path = "/api/v1",
    tag = "Service Report Service",
    get,
    path = "/services/download/{serviceId}",
    responses(
        (status = 200, description = "PDF byte stream", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Service or file not found", body = ErrorResponse),
        (status = 500, description = "Stream error", body = ErrorResponse)
    ),
    params(
        ("serviceId" = String, Path, description = "Generated id of the service report")
    )
)]
pub async fn download_service(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let service_id = sanitize(path.into_inner());

    // The record is checked before the file, so a missing record and a
    // missing artifact report differently.
    if data.store.find_service(&service_id).is_none() {
        error!("service {service_id} not found in store");
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Service not found"));
    }

    let pdf_path = data.config.service_path(&service_id);
    if !pdf_path.exists() {
        error!("service file not found at {}", pdf_path.display());
        return HttpResponse::NotFound()
            .json(ErrorResponse::not_found("Service PDF file not found"));
    }

    match NamedFile::open(&pdf_path) {
        Ok(file) => file
            .set_content_disposition(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!(
                    "service-{service_id}.pdf"
                ))],
            })
            .into_response(&req),
        Err(e) => {
            error!("failed to stream service {service_id}: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
                "Failed to download service: {e}"
            )))
        }
    }
}
