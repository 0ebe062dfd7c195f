// Query latency measurement
// 查询延迟测量

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::{hint::black_box, time::Instant};

use hdrhistogram::Histogram;

use crate::{Benchmarker, Lookup, Result, Workload};

/// Max per-query value: 1 second in picoseconds
/// 单次查询最大值：1 秒（皮秒）
const MAX_PS: u64 = 1_000_000_000_000;

/// Significant figures for histogram precision
/// 直方图精度的有效数字
const SIGFIG: u8 = 3;

/// Default untimed warmup passes / 默认预热轮数
pub const WARMUP: usize = 1;

/// Default timed passes / 默认计时轮数
pub const ROUNDS: usize = 5;

/// Histogram of per-round average query times, stored in picoseconds
/// 每轮平均查询时间的直方图，以皮秒存储
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
  inner: Histogram<u64>,
}

impl LatencyHistogram {
  pub fn new() -> Result<Self> {
    let inner = Histogram::new_with_bounds(1, MAX_PS, SIGFIG)?;
    Ok(Self { inner })
  }

  /// Record a value in nanoseconds, saturating at the bounds
  /// 记录纳秒值，超出范围时饱和
  pub fn record_ns(&mut self, ns: f64) {
    let ps = (ns * 1000.0).round().clamp(1.0, MAX_PS as f64) as u64;
    self.inner.saturating_record(ps);
  }

  pub fn median_ns(&self) -> f64 {
    self.inner.value_at_quantile(0.5) as f64 / 1000.0
  }

  pub fn min_ns(&self) -> f64 {
    self.inner.min() as f64 / 1000.0
  }

  pub fn max_ns(&self) -> f64 {
    self.inner.max() as f64 / 1000.0
  }

  pub fn mean_ns(&self) -> f64 {
    self.inner.mean() / 1000.0
  }

  pub fn count(&self) -> u64 {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn reset(&mut self) {
    self.inner.reset();
  }
}

/// Benchmarker running a fixed workload: `warmup` untimed passes, then
/// `rounds` timed passes; reports the median per-query average.
/// 运行固定负载的评测器：先 `warmup` 轮不计时预热，再 `rounds` 轮计时；返回每轮平均值的中位数。
#[derive(Debug, Clone)]
pub struct QueryBench {
  workload: Workload,
  warmup: usize,
  rounds: usize,
  hist: LatencyHistogram,
}

impl QueryBench {
  pub fn new(workload: Workload, warmup: usize, rounds: usize) -> Result<Self> {
    Ok(Self {
      workload,
      warmup,
      rounds: rounds.max(1),
      hist: LatencyHistogram::new()?,
    })
  }

  pub fn workload(&self) -> &Workload {
    &self.workload
  }

  /// Rounds of the last benchmark
  /// 最近一次评测的各轮数据
  pub fn last(&self) -> &LatencyHistogram {
    &self.hist
  }
}

impl<I: Lookup> Benchmarker<I> for QueryBench {
  fn bench(&mut self, index: &I, data: &[i64]) -> Result<f64> {
    let keys = self.workload.keys();
    if keys.is_empty() {
      return Ok(0.0);
    }

    for _ in 0..self.warmup {
      pass(index, data, keys);
    }

    self.hist.reset();
    for _ in 0..self.rounds {
      let start = Instant::now();
      pass(index, data, keys);
      self
        .hist
        .record_ns(start.elapsed().as_nanos() as f64 / keys.len() as f64);
    }
    Ok(self.hist.median_ns())
  }
}

#[inline]
fn pass<I: Lookup>(index: &I, data: &[i64], keys: &[i64]) {
  for &key in keys {
    black_box(index.find(data, black_box(key)));
  }
}
