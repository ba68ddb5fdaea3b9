use experience_booking::{init_logging, run};
use tracing::error;

#[tokio::main]
async fn main() {
    let _guard = init_logging();

    if let Err(e) = run().await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
