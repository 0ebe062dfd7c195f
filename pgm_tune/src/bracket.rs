// Epsilon search bracket
// Epsilon 搜索区间

use std::mem::size_of;

use crate::{Error, Result};

/// Cache line size in bytes
/// 缓存行大小（字节）
#[cfg(all(target_arch = "aarch64", target_vendor = "apple"))]
pub const CACHE_LINE: usize = 128;
#[cfg(not(all(target_arch = "aarch64", target_vendor = "apple")))]
pub const CACHE_LINE: usize = 64;

/// Below two cache lines of keys a finer epsilon costs the same memory reads
/// 低于两个缓存行的键数时，更小的 epsilon 不会减少内存读取
pub const CACHE_EPSILON: usize = 2 * CACHE_LINE / size_of::<i64>();

/// Closed epsilon range [lo, hi], lo >= 1
/// 闭区间 [lo, hi]，lo >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
  lo: usize,
  hi: usize,
}

impl Bracket {
  pub fn new(lo: usize, hi: usize) -> Result<Self> {
    if lo == 0 || lo > hi {
      return Err(Error::InvalidRange { lo, hi });
    }
    Ok(Self { lo, hi })
  }

  /// Default range for a dataset of `len` keys: [CACHE_EPSILON, len / 2]
  /// 数据集的默认区间：[CACHE_EPSILON, len / 2]
  pub fn for_len(len: usize) -> Self {
    Self {
      lo: CACHE_EPSILON,
      hi: (len / 2).max(CACHE_EPSILON),
    }
  }

  #[inline]
  pub fn lo(&self) -> usize {
    self.lo
  }

  #[inline]
  pub fn hi(&self) -> usize {
    self.hi
  }

  #[inline]
  pub fn width(&self) -> usize {
    self.hi - self.lo + 1
  }

  /// Lower midpoint
  /// 下中位点
  #[inline]
  pub fn mid(&self) -> usize {
    self.lo + (self.hi - self.lo) / 2
  }

  /// Most bisection steps a run can take: ⌊log2(width)⌋ + 1, each step at
  /// least halves the bracket
  /// 一次运行的最多二分步数：⌊log2(width)⌋ + 1，每步至少减半
  pub fn max_evals(&self) -> usize {
    (usize::BITS - self.width().leading_zeros()) as usize
  }

  /// Part strictly above `at`, None once empty
  /// 严格大于 `at` 的部分，为空时返回 None
  #[inline]
  pub fn above(self, at: usize) -> Option<Self> {
    (at < self.hi).then(|| Self {
      lo: at + 1,
      hi: self.hi,
    })
  }

  /// Part strictly below `at`, None once empty
  /// 严格小于 `at` 的部分，为空时返回 None
  #[inline]
  pub fn below(self, at: usize) -> Option<Self> {
    (at > self.lo).then(|| Self {
      lo: self.lo,
      hi: at - 1,
    })
  }
}
