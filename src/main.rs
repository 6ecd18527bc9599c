#[tokio::main]
async fn main() {
    prestart_backend::run().await;
}
