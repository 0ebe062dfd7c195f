//! # pgm_tune: space-time trade-off tuner for the Pgm index
//! pgm_tune：Pgm 索引的时空权衡调优器
//!
//! Finds the epsilon that keeps one metric (query time or index size) within
//! a tolerance band around a target while minimising the other.
//! 寻找使一个指标（查询时间或索引大小）保持在目标容差带内、同时最小化另一指标的 epsilon。
//!
//! ```rust
//! use pgm_tune::{PgmBuilder, Probe, QueryBench, Silent, Tuner, Workload};
//!
//! let data: Vec<i64> = (0..100_000).map(|i| i * 3).collect();
//! let bench = QueryBench::new(Workload::sample(&data, 1_000, 42), 1, 3).unwrap();
//! let mut tuner = Tuner::new(Probe::new(PgmBuilder::default(), bench), Silent);
//! let tuned = tuner
//!   .minimize_time_given_space(64 << 10, 0.5, &data, 16, 50_000)
//!   .unwrap();
//! assert!(tuned.evaluations >= 1);
//! ```

mod bracket;
mod candidate;
mod conf;
pub mod constraint;
mod error;
pub mod latency;
mod load;
mod oracle;
mod report;
mod tuner;
pub mod workload;

pub use bracket::{Bracket, CACHE_EPSILON, CACHE_LINE};
pub use candidate::{Candidate, Status, Tuned};
pub use conf::{BinWidth, Cli, Conf, VERBOSE_FILTER};
pub use constraint::{Band, Constraint, Pos};
pub use error::{Error, Result};
pub use latency::{LatencyHistogram, QueryBench};
pub use load::{Format, Width, load};
pub use oracle::{Benchmarker, Builder, Built, Lookup, Oracle, PgmBuilder, Probe};
pub use report::{Report, Silent, Table, Trail};
pub use tuner::{Stop, Tuner};
pub use workload::Workload;
