use mailsift::auth::TokenProvider;
use mailsift::config::Config;
use mailsift::gmail::GmailClient;
use mailsift::pipeline::Pipeline;
use mailsift::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env();

    // `--reset` wipes the output tree and exits.
    if std::env::args().any(|a| a == "--reset") {
        storage::reset(&config.output_dir).await;
        return Ok(());
    }

    eprintln!("📬 mailsift v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Output: {}", config.output_dir.display());
    eprintln!("   Max results: {}\n", config.max_results);

    let auth = TokenProvider::new(config.token_path.clone(), config.credentials_path.clone());
    let client = GmailClient::new(auth);
    let pipeline = Pipeline::new(client, config.output_dir.clone(), config.max_results);

    let summary = pipeline.run().await?;

    eprintln!(
        "\nDone: {} message(s) archived, {} attachment(s) saved under {}",
        summary.processed,
        summary.attachments,
        config.output_dir.display()
    );

    Ok(())
}
