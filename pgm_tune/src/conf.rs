// Command line configuration
// 命令行配置

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::{
  Bracket, Constraint, Error, Format, Result, Stop, Width,
  latency::{ROUNDS, WARMUP},
  workload::{QUERIES, SEED},
};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BinWidth {
  #[default]
  #[value(name = "32")]
  W32,
  #[value(name = "64")]
  W64,
}

/// Space-time trade-off tuner for the Pgm index.
///
/// Give a maximum space and get the index minimising the query time within
/// that space, or give a maximum query time and get the index minimising the
/// space.
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["time", "space"])))]
#[command(group(ArgGroup::new("kind").required(true).args(["binary", "csv"])))]
pub struct Cli {
  /// Specify a time (ns) to minimise the space
  #[arg(short, long, value_name = "ns")]
  pub time: Option<u64>,

  /// Specify a space (bytes) to minimise the time
  #[arg(short, long, value_name = "bytes")]
  pub space: Option<u64>,

  /// Tolerance between 0 and 1 on the constraint
  #[arg(short = 'o', long = "tol", value_name = "float", default_value_t = 0.01)]
  pub tol: f64,

  /// Show additional logging info
  #[arg(short, long)]
  pub verbose: bool,

  /// The input file is a binary file of little-endian integers
  #[arg(short, long)]
  pub binary: bool,

  /// The input file contains integers separated by newlines or commas
  #[arg(short, long)]
  pub csv: bool,

  /// Integer width of a binary file
  #[arg(long, value_enum, default_value_t = BinWidth::W32)]
  pub width: BinWidth,

  /// Smallest epsilon to try (default: two cache lines of keys)
  #[arg(long)]
  pub lo: Option<usize>,

  /// Largest epsilon to try (default: half the dataset)
  #[arg(long)]
  pub hi: Option<usize>,

  /// Number of lookups per benchmark round
  #[arg(long, default_value_t = QUERIES)]
  pub queries: usize,

  /// Timed benchmark rounds per candidate
  #[arg(long, default_value_t = ROUNDS)]
  pub rounds: usize,

  /// Seed of the query workload
  #[arg(long, default_value_t = SEED)]
  pub seed: u64,

  /// Stop at the first candidate inside the tolerance band
  #[arg(long)]
  pub first: bool,

  /// The file containing the input data
  pub file: PathBuf,
}

/// Validated run configuration
/// 校验后的运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct Conf {
  pub constraint: Constraint,
  pub tolerance: f64,
  pub verbose: bool,
  pub format: Format,
  pub file: PathBuf,
  pub lo: Option<usize>,
  pub hi: Option<usize>,
  pub queries: usize,
  pub warmup: usize,
  pub rounds: usize,
  pub seed: u64,
  pub stop: Stop,
}

/// Log filter `--verbose` installs: every bisection step and the outcome
/// `--verbose` 使用的日志过滤：每步二分与最终结果
pub const VERBOSE_FILTER: &str = "debug";

impl Cli {
  /// `RUST_LOG` value to install before the logger starts, if any. An explicit
  /// `RUST_LOG` always wins.
  /// 日志器启动前需设置的 `RUST_LOG` 值。显式设置的 `RUST_LOG` 优先。
  pub fn log_filter(&self, rust_log_set: bool) -> Option<&'static str> {
    (self.verbose && !rust_log_set).then_some(VERBOSE_FILTER)
  }

  /// Validate everything checkable before the dataset is read
  /// 在读取数据集前校验所有可校验项
  #[allow(clippy::cast_precision_loss)]
  pub fn conf(self) -> Result<Conf> {
    let constraint = match (self.time, self.space) {
      (Some(ns), None) => Constraint::Time(ns as f64),
      (None, Some(bytes)) => Constraint::Space(usize::try_from(bytes).unwrap_or(usize::MAX)),
      // clap's "mode" group rejects both and neither
      _ => return Err(Error::InvalidTarget(0.0)),
    };
    constraint.band(self.tol)?;
    if let (Some(lo), Some(hi)) = (self.lo, self.hi) {
      Bracket::new(lo, hi)?;
    }
    if self.lo == Some(0) {
      return Err(Error::InvalidRange {
        lo: 0,
        hi: self.hi.unwrap_or(0),
      });
    }

    let format = if self.binary {
      Format::Binary(match self.width {
        BinWidth::W32 => Width::W32,
        BinWidth::W64 => Width::W64,
      })
    } else {
      Format::Csv
    };

    Ok(Conf {
      constraint,
      tolerance: self.tol,
      verbose: self.verbose,
      format,
      file: self.file,
      lo: self.lo,
      hi: self.hi,
      queries: self.queries.max(1),
      warmup: WARMUP,
      rounds: self.rounds.max(1),
      seed: self.seed,
      stop: if self.first {
        Stop::FirstInBand
      } else {
        Stop::Tightest
      },
    })
  }
}

impl Conf {
  /// Bracket for a dataset of `len` keys, explicit bounds override defaults
  /// 数据集的搜索区间，显式边界优先
  pub fn bracket(&self, len: usize) -> Result<Bracket> {
    let default = Bracket::for_len(len);
    Bracket::new(
      self.lo.unwrap_or(default.lo()),
      self.hi.unwrap_or(default.hi()),
    )
  }
}
