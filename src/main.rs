use clap::Parser;
use salesforecast::cli::{self, output, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(&cli).await {
        tracing::error!(error = %e, "salesforecast failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
