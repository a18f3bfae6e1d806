use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, info};
use sanitize_filename::sanitize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::certificate::models::CreateCertificateRequest;
use crate::document;
use crate::{AppState, ErrorResponse};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    #[schema(example = "Certificate generated successfully!")]
    pub message: String,
    #[schema(example = "CERT-f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub certificate_id: String,
    #[schema(
        example = "/api/v1/certificates/download/CERT-f1e2d3c4-b5a6-7890-1234-567890abcdef"
    )]
    pub download_url: String,
}

#[utoipa::path(
    context_path = "/api/v1",
    tag = "Certificate Service",
    post,
    path = "/certificates/generateCertificate",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate created and rendered", body = CertificateResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Persistence or render failure", body = ErrorResponse)
    )
)]
pub async fn generate_certificate(
    req: web::Json<CreateCertificateRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let new = match req.into_inner().into_new() {
        Ok(new) => new,
        Err(message) => {
            error!("certificate submission rejected: {message}");
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    let certificate = match data.store.save_certificate(new) {
        Ok(certificate) => certificate,
        Err(e) => {
            error!("failed to persist certificate: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                &format!("Failed to generate certificate: {e}"),
            ));
        }
    };

    let generated_on = document::common::generation_timestamp();
    let layout = document::certificate::layout(&certificate, data.config.logo(), &generated_on);
    let output = data.config.certificate_path(&certificate.certificate_id);

    if let Err(e) = data.renderer.render(&layout, &output) {
        error!(
            "render failed for certificate {}: {e}",
            certificate.certificate_id
        );
        // Compensate for the two-step commit: a record whose document never
        // materialized is removed again.
        data.store.remove_certificate(&certificate.certificate_id);
        return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
            &format!("Failed to generate certificate: {e}"),
        ));
    }

    data.metrics
        .documents_generated
        .with_label_values(&["certificate"])
        .inc();
    info!(
        "certificate {} ({}) rendered to {}",
        certificate.certificate_id,
        certificate.certificate_no,
        output.display()
    );

    HttpResponse::Created().json(CertificateResponse {
        message: "Certificate generated successfully!".to_string(),
        download_url: format!(
            "/api/v1/certificates/download/{}",
            certificate.certificate_id
        ),
        certificate_id: certificate.certificate_id,
    })
}

#[utoipa::path(
    context_path = "/api/v1",
    tag = "Certificate Service",
    get,
    path = "/certificates/download/{certificateId}",
    responses(
        (status = 200, description = "PDF byte stream", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Certificate not found", body = ErrorResponse),
        (status = 500, description = "Stream error", body = ErrorResponse)
    ),
    params(
        ("certificateId" = String, Path, description = "Generated id of the certificate")
    )
)]
pub async fn download_certificate(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let certificate_id = sanitize(path.into_inner());
    let pdf_path = data.config.certificate_path(&certificate_id);

    if !pdf_path.exists() {
        error!("certificate file not found at {}", pdf_path.display());
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Certificate not found"));
    }

    match NamedFile::open(&pdf_path) {
        Ok(file) => file
            .set_content_disposition(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!("{certificate_id}.pdf"))],
            })
            .into_response(&req),
        Err(e) => {
            error!("failed to stream certificate {certificate_id}: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
                "Failed to download certificate: {e}"
            )))
        }
    }
}
