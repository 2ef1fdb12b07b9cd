use clap::Parser;
use toefl_watch::utils::logger;
use toefl_watch::{CliArgs, HttpPageSource, QtyFieldExtractor, SmtpNotifier, WatchConfig, Watcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    // 載入配置，缺少必要設定直接結束
    let config = match WatchConfig::load(args.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let source = HttpPageSource::new(config.check_url.clone())?;
    let notifier = SmtpNotifier::new(config.smtp.clone());
    let watcher = Watcher::new(
        source,
        QtyFieldExtractor::new(),
        notifier,
        config.check_url.clone(),
        config.notify_email.clone(),
        config.interval,
    );

    if args.once {
        tracing::info!("Running a single check");
        watcher.run_cycles(1).await;
        return Ok(());
    }

    watcher.run().await;
    Ok(())
}
