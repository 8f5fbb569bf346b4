#[tokio::main]
async fn main() {
    if booking_load::run_with_config().await.is_err() {
        std::process::exit(1);
    }
}
