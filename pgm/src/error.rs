//! Error definitions for Pgm
//! Pgm 错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("Data cannot be empty / 数据不能为空")]
  EmptyData,

  #[error("Data must be sorted / 数据必须已排序")]
  NotSorted,

  #[error("Epsilon must be >= {min} (provided: {provided}) / Epsilon 必须 >= {min} (提供的值: {provided})")]
  InvalidEpsilon { provided: usize, min: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
