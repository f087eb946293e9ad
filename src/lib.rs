//! vessel-lab: 箱・瓶・鉢の三つの容器に、固体・液体・気体を入れて眺めるちいさなシミュレーション。
//!
//! 毎フレーム `scheduler::FrameScheduler` が容器の配置を計算し、水位と気体の粒子を進めて、
//! `render` のソフトウェア描画でフレームバッファに描く。ウィンドウ表示は `app`、GPU なしの実行は `headless`。

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod headless;
pub mod hit_test;
pub mod input;
pub mod physics;
pub mod render;
pub mod renderer;
pub mod scheduler;
pub mod showcase;
pub mod ui;

pub use config::{AppConfig, ConfigError, HitPolicy};
pub use error::Error;
pub use hit_test::{hits, PointerHitTester, VesselEvent};
pub use scheduler::{BufferSurface, FrameReport, FrameRequester, FrameScheduler, RenderSurface, SchedulerState};
