#[tokio::main]
async fn main() {
    if let Err(e) = service_scaffold::run_with_config().await {
        tracing::error!(error = %e, "service exited with error");
        std::process::exit(1);
    }
}
