// Build + benchmark capabilities consumed by the tuner
// 调优器使用的构建与评测能力

use std::time::{Duration, Instant};

use log::trace;
use pgm::{EPSILON_REC, Pgm};

use crate::{Candidate, Result};

/// A freshly built index with its construction metrics
/// 新构建的索引及其构建指标
#[derive(Debug)]
pub struct Built<I> {
  pub index: I,
  pub elapsed: Duration,
  pub bytes: usize,
}

impl<I> Built<I> {
  /// Time `build`, then size the result with `bytes`
  /// 对 `build` 计时，再用 `bytes` 计算大小
  pub fn timed<E>(
    build: impl FnOnce() -> Result<I, E>,
    bytes: impl FnOnce(&I) -> usize,
  ) -> Result<Self, E> {
    let start = Instant::now();
    let index = build()?;
    let elapsed = start.elapsed();
    let bytes = bytes(&index);
    Ok(Self {
      index,
      elapsed,
      bytes,
    })
  }
}

/// Index Builder: sorted keys + epsilon -> index
/// 索引构建器：已排序键 + epsilon -> 索引
pub trait Builder {
  type Index;

  fn build(&mut self, data: &[i64], epsilon: usize) -> Result<Built<Self::Index>>;
}

/// Point lookup the benchmarker drives
/// 评测器调用的点查
pub trait Lookup {
  /// First position with a key >= `key`
  /// 第一个 >= `key` 的位置
  fn find(&self, data: &[i64], key: i64) -> usize;
}

/// Query Benchmarker: average ns per query on a built index
/// 查询评测器：已构建索引的平均单次查询纳秒数
pub trait Benchmarker<I> {
  fn bench(&mut self, index: &I, data: &[i64]) -> Result<f64>;
}

/// Metric oracle: everything the search needs to know about one epsilon
/// 指标预言机：搜索所需的单个 epsilon 的全部信息
pub trait Oracle {
  fn measure(&mut self, data: &[i64], epsilon: usize) -> Result<Candidate>;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
  fn measure(&mut self, data: &[i64], epsilon: usize) -> Result<Candidate> {
    (**self).measure(data, epsilon)
  }
}

/// Oracle backed by a real builder and benchmarker. The index is dropped
/// before `measure` returns, so at most one is alive at a time.
/// 由真实构建器与评测器支撑的预言机。索引在 `measure` 返回前释放，同一时刻最多存在一个。
#[derive(Debug)]
pub struct Probe<B, Q> {
  pub builder: B,
  pub bench: Q,
}

impl<B, Q> Probe<B, Q> {
  pub fn new(builder: B, bench: Q) -> Self {
    Self { builder, bench }
  }
}

impl<B, Q> Oracle for Probe<B, Q>
where
  B: Builder,
  Q: Benchmarker<B::Index>,
{
  fn measure(&mut self, data: &[i64], epsilon: usize) -> Result<Candidate> {
    let built = self.builder.build(data, epsilon)?;
    let query_ns = self.bench.bench(&built.index, data)?;
    trace!(
      "eps={epsilon} built in {:?}, {} bytes, {query_ns:.1} ns/query",
      built.elapsed, built.bytes
    );
    Ok(Candidate {
      epsilon,
      build: built.elapsed,
      space: built.bytes,
      query_ns,
    })
  }
}

/// Builds [`Pgm`] indexes
/// 构建 [`Pgm`] 索引
#[derive(Debug, Clone, Copy)]
pub struct PgmBuilder {
  pub epsilon_rec: usize,
}

impl Default for PgmBuilder {
  fn default() -> Self {
    Self {
      epsilon_rec: EPSILON_REC,
    }
  }
}

impl Builder for PgmBuilder {
  type Index = Pgm<i64>;

  fn build(&mut self, data: &[i64], epsilon: usize) -> Result<Built<Pgm<i64>>> {
    let epsilon_rec = self.epsilon_rec;
    let built = Built::timed(
      || Pgm::with_rec(data, epsilon, epsilon_rec, false),
      Pgm::mem_usage,
    )?;
    Ok(built)
  }
}

impl Lookup for Pgm<i64> {
  #[inline]
  fn find(&self, data: &[i64], key: i64) -> usize {
    self.lower_bound(data, key)
  }
}
