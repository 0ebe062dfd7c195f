//! # Pgm: recursive piecewise-linear learned index
//! Pgm：递归分段线性学习型索引
//!
//! Segments sorted keys into linear models with a bounded position error
//! (`epsilon`), then indexes the segments themselves the same way until a
//! single root segment remains.
//! 将已排序键切分为误差受限（`epsilon`）的线性模型，再以同样方式递归索引段本身，直到只剩一个根段。
//!
//! ## Usage / 使用方法
//!
//! ```rust
//! use pgm::Pgm;
//!
//! let data: Vec<i64> = (0..10_000).map(|i| i * 3).collect();
//! let pgm = Pgm::new(&data, 32, true).unwrap();
//! assert_eq!(pgm.get(&data, 300), Some(100));
//! assert_eq!(pgm.lower_bound(&data, 301), 101);
//! ```

mod build;
mod consts;
pub mod error;
mod pgm;
mod types;

pub use build::{build_levels, build_segments};
pub use consts::{EPSILON_REC, MIN_EPSILON, ZERO_SLOPE_THRESHOLD};
pub use error::{Error, Result};
pub use pgm::Pgm;
pub use types::{Key, PgmStats, Segment};
