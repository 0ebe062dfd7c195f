//! Type definitions for Pgm
//! Pgm 类型定义

#![allow(
  clippy::cast_precision_loss,
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use std::fmt::Debug;

use crate::consts::ZERO_SLOPE_THRESHOLD;

/// Key trait for supported types
/// 支持的键类型约束
pub trait Key: Copy + Send + Sync + Ord + Debug + 'static {
  /// Convert to f64 (lossy for wide keys)
  /// 转换为 f64（宽类型会丢失精度）
  fn as_f64(self) -> f64;
}

macro_rules! impl_key {
  ($($t:ty),*) => {
    $(
      impl Key for $t {
        #[inline(always)]
        fn as_f64(self) -> f64 {
          self as f64
        }
      }
    )*
  };
}

impl_key!(
  u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize
);

/// Linear segment: pos = slope * key + intercept, over positions [start_idx, end_idx)
/// 线性段：pos = slope * key + intercept，覆盖位置 [start_idx, end_idx)
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Segment<K: Key> {
  pub min_key: K,
  pub max_key: K,
  pub slope: f64,
  pub intercept: f64,
  pub start_idx: usize,
  pub end_idx: usize,
}

impl<K: Key> Segment<K> {
  /// Predicted position, clamped into the segment
  /// 预测位置（限制在段内）
  #[inline]
  #[must_use]
  pub fn predict(&self, key: K) -> usize {
    if self.slope.abs() < ZERO_SLOPE_THRESHOLD {
      return self.start_idx;
    }
    let pos = self.slope.mul_add(key.as_f64(), self.intercept) + 0.5;
    if pos.is_nan() || pos < self.start_idx as f64 {
      self.start_idx
    } else if pos >= (self.end_idx - 1) as f64 {
      self.end_idx - 1
    } else {
      pos as usize
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.end_idx - self.start_idx
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.end_idx == self.start_idx
  }
}

/// Index statistics
/// 索引统计信息
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PgmStats {
  /// Leaf segments / 叶子段数
  pub segments: usize,
  /// Number of levels including the root / 层数（含根）
  pub height: usize,
  pub avg_segment_size: f64,
  pub memory_bytes: usize,
}
