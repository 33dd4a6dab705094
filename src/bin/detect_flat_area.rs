use clap::Parser;
use phonecase_kit::domain::model::FlatAreaRenders;
use phonecase_kit::utils::{
    logger,
    validation::{validate_image_path, Validate},
};
use phonecase_kit::{load_image, DetectArgs, DirectoryPresenter, FlatAreaDetector, Presenter};

fn main() {
    let args = DetectArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("🚀 Starting flat area detection");
    tracing::debug!("CLI args: {:?}", args);

    if let Err(e) = run(&args) {
        tracing::error!("❌ Flat area detection failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(args: &DetectArgs) -> phonecase_kit::Result<()> {
    validate_image_path("image", &args.image)?;
    let config = args.detector_config()?;
    config.validate()?;

    let image = load_image(&args.image)?;
    let mut detector = FlatAreaDetector::new(config).with_monitoring(args.monitor);
    let renders = detector.detect(&image)?;

    tracing::info!(
        "🔍 {} contours, {} blocked, {:.1}% safe to print",
        renders.contours.len(),
        renders.blocked_count(),
        renders.flat_ratio() * 100.0
    );

    if let Some(dir) = &args.save_dir {
        let presenter = DirectoryPresenter::new(dir);
        presenter.present(&renders)?;
        tracing::info!("📁 Renders saved to: {}", presenter.base_path().display());
    }

    if !args.headless {
        show_window(&renders)?;
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn show_window(renders: &FlatAreaRenders) -> phonecase_kit::Result<()> {
    phonecase_kit::present::WindowPresenter::default().present(renders)
}

#[cfg(not(feature = "gui"))]
fn show_window(_renders: &FlatAreaRenders) -> phonecase_kit::Result<()> {
    Err(phonecase_kit::KitError::DisplayError {
        message: "built without the `gui` feature, no window available".to_string(),
    })
}
