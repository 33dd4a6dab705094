use clap::Parser;
use phonecase_kit::utils::{logger, validation::Validate};
use phonecase_kit::{ReplayArgs, ReplaySequence};

#[tokio::main]
async fn main() {
    let args = ReplayArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = match args.replay_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let sequence = match ReplaySequence::colorpark(&config) {
        Ok(sequence) => sequence,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!("🎬 Starting replay: {:?}", sequence);

    match sequence.execute_all().await {
        Ok(context) => {
            let summary = ReplaySequence::get_execution_summary(&context);
            tracing::info!("📊 Replay summary: {:?}", summary);
        }
        Err(e) => {
            // 錯誤訊息已在序列中印出
            tracing::error!("❌ Replay aborted: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
