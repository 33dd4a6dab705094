use crate::config::detector_config::DetectorConfig;
use crate::config::replay_config::ReplayConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "detect_flat_area")]
#[command(about = "Mask out raised regions of a phone-case photo")]
pub struct DetectArgs {
    /// Image to analyse
    #[arg(default_value = "phone_case.jpg")]
    pub image: PathBuf,

    /// Optional TOML file with detector parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the small-contour area threshold (px²)
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Write original/edges/mask/result PNGs into this directory
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Do not open the inspection window
    #[arg(long)]
    pub headless: bool,

    /// Log CPU and memory usage per pipeline stage
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl DetectArgs {
    pub fn detector_config(&self) -> Result<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_file(path)?,
            None => DetectorConfig::default(),
        };

        if let Some(min_area) = self.min_area {
            config.min_flat_area = min_area;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "replay_payload")]
#[command(about = "Replay the Works.save -> Order.create -> Machine.wait sequence")]
pub struct ReplayArgs {
    /// Optional TOML file; `${VAR}` references are resolved from the environment
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, env = "COLORPARK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long)]
    pub machine_id: Option<String>,

    #[arg(long)]
    pub goods_id: Option<String>,

    #[arg(long)]
    pub user_id: Option<u64>,

    /// Pause before Order.create and Machine.wait
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ReplayArgs {
    /// 設定檔為基礎，命令列參數優先
    pub fn replay_config(&self) -> Result<ReplayConfig> {
        let mut config = match &self.config {
            Some(path) => ReplayConfig::from_file(path)?,
            None => ReplayConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(token) = &self.token {
            config.token = token.clone();
        }
        if let Some(machine_id) = &self.machine_id {
            config.machine_id = machine_id.clone();
        }
        if let Some(goods_id) = &self.goods_id {
            config.goods_id = goods_id.clone();
        }
        if let Some(user_id) = self.user_id {
            config.user_id = user_id;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }

        Ok(config)
    }
}
