#[actix_web::main]
async fn main() -> std::io::Result<()> {
    rongda_disclosure_server::run().await
}
