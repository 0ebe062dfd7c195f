// Error types for pgm_tune
// pgm_tune 错误类型

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Invalid epsilon range [{lo}, {hi}] / 无效的 epsilon 范围")]
  InvalidRange { lo: usize, hi: usize },

  #[error("Dataset is empty / 数据集为空")]
  InsufficientData,

  #[error("Target must be a positive finite number (got {0}) / 目标必须为正有限数")]
  InvalidTarget(f64),

  #[error("Tolerance must be within [0, 1] (got {0}) / 容差必须在 [0, 1] 内")]
  InvalidTolerance(f64),

  #[error("{path}: malformed data at line {line}: {field:?} / 数据格式错误")]
  Malformed {
    path: PathBuf,
    line: usize,
    field: String,
  },

  #[error("{path}: {len} bytes is not a multiple of {width} / 文件长度不是整数宽度的倍数")]
  Truncated {
    path: PathBuf,
    len: usize,
    width: usize,
  },

  #[error("{path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Histogram error: {0}")]
  Histogram(#[from] hdrhistogram::CreationError),

  #[error("Index error: {0}")]
  Pgm(#[from] pgm::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
