use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vessel_lab::{app, headless, AppConfig};

/// 三つの容器に物質を入れて眺める。
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// YAML の設定ファイル
    #[arg(long)]
    config: Option<PathBuf>,

    /// ウィンドウを開かずにメモリ上で回す
    #[arg(long)]
    headless: bool,

    /// ヘッドレス実行のフレーム数
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// 粒子の乱数シード（省略時は毎回ちがう）
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid configuration")?;
    info!(
        vessels = config.vessels.len(),
        width = config.window.width,
        height = config.window.height,
        seed = ?config.seed,
        "configuration loaded"
    );

    if args.headless {
        headless::run(&config, args.frames).context("headless run failed")?;
    } else {
        app::run(config).context("event loop failed")?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
