use clap::Parser;
use interior_quote::commands::{exit_code, run};
use interior_quote::utils::logger;
use interior_quote::{CliConfig, QuoteError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting interior-quote");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(err) = run(cli, &mut std::io::stdout()).await {
        let code = match err.downcast_ref::<QuoteError>() {
            Some(e) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                exit_code(e)
            }
            None => {
                tracing::error!("❌ {:#}", err);
                eprintln!("❌ {:#}", err);
                1
            }
        };

        if code > 0 {
            std::process::exit(code);
        }
    }
}
