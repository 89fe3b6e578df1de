#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    pantry_backend::run().await;
}
