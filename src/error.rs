use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// クレート全体のエラー。描画中の失敗はここまで上がってこない（ログに出してスキップする）。
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("drawing surface error: {0}")]
    Surface(String),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

impl From<pixels::Error> for Error {
    fn from(err: pixels::Error) -> Self {
        Error::Surface(err.to_string())
    }
}

impl From<pixels::TextureError> for Error {
    fn from(err: pixels::TextureError) -> Self {
        Error::Surface(err.to_string())
    }
}
