#[actix_web::main]
async fn main() -> std::io::Result<()> {
    sprier_cert_server::run().await
}
