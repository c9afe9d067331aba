#[actix_web::main]
async fn main() -> std::io::Result<()> {
    promptvault::run().await
}
