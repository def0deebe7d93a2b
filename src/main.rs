use clap::Parser;
use fare_watch::utils::error::ErrorSeverity;
use fare_watch::utils::{logger, validation::Validate};
use fare_watch::{build_monitor, CliConfig, MonitorConfig, MonitorError, PassOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    // Telegram 憑證通常放在 .env
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = match MonitorConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    let mut monitor = match build_monitor(&config).await {
        Ok(monitor) => monitor,
        Err(e) => exit_with(e),
    };

    let result = if args.once {
        monitor.run_pass().await.map(|outcome| match outcome {
            PassOutcome::Completed(summary) => {
                println!(
                    "✅ Checked {} routes: {} changed, {} unchanged, {} failed",
                    summary.checked, summary.changed, summary.unchanged, summary.failed
                );
            }
            PassOutcome::Skipped { reason } => println!("⚠️ Pass skipped: {}", reason),
        })
    } else {
        monitor.run_forever().await
    };

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

fn exit_with(e: MonitorError) -> ! {
    tracing::error!(
        "❌ Fare monitoring stopped: {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
