// Operating constraint and its acceptance band
// 运行约束及其容差带

use crate::{Candidate, Error, Result};

/// What the caller bounds; the other metric gets minimized
/// 调用方约束的指标；另一指标被最小化
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
  /// Max average query time in ns, minimize space
  /// 最大平均查询时间（纳秒），最小化空间
  Time(f64),
  /// Max index footprint in bytes, minimize time
  /// 最大索引占用（字节），最小化时间
  Space(usize),
}

impl Constraint {
  #[allow(clippy::cast_precision_loss)]
  pub fn target(self) -> f64 {
    match self {
      Self::Time(ns) => ns,
      Self::Space(bytes) => bytes as f64,
    }
  }

  /// The constrained metric of a candidate
  /// 候选的受约束指标
  #[allow(clippy::cast_precision_loss)]
  pub fn metric(self, c: &Candidate) -> f64 {
    match self {
      Self::Time(_) => c.query_ns,
      Self::Space(_) => c.space as f64,
    }
  }

  /// Direction to move once a candidate is within budget: time grows with
  /// epsilon, so spend it by going larger; space shrinks with epsilon, so
  /// spend it by going smaller.
  /// 候选满足预算后的移动方向：时间随 epsilon 增大，向大走；空间随 epsilon 减小，向小走。
  pub fn larger_when_feasible(self) -> bool {
    matches!(self, Self::Time(_))
  }

  pub fn band(self, tolerance: f64) -> Result<Band> {
    Band::new(self.target(), tolerance)
  }
}

/// Where a value sits relative to the band
/// 数值相对容差带的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
  Below,
  Within,
  Above,
}

/// Acceptance band [target·(1−tol), target·(1+tol)]
/// 容差带 [target·(1−tol), target·(1+tol)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
  pub target: f64,
  pub lo: f64,
  pub hi: f64,
}

impl Band {
  pub fn new(target: f64, tolerance: f64) -> Result<Self> {
    if !target.is_finite() || target <= 0.0 {
      return Err(Error::InvalidTarget(target));
    }
    if !(0.0..=1.0).contains(&tolerance) {
      return Err(Error::InvalidTolerance(tolerance));
    }
    Ok(Self {
      target,
      lo: target * (1.0 - tolerance),
      hi: target * (1.0 + tolerance),
    })
  }

  /// NaN counts as above, an unusable measurement never satisfies the budget
  /// NaN 视为超出，无效测量永不满足预算
  #[inline]
  pub fn position(&self, value: f64) -> Pos {
    if value.is_nan() || value > self.hi {
      Pos::Above
    } else if value < self.lo {
      Pos::Below
    } else {
      Pos::Within
    }
  }

  /// Half-width of the band
  /// 容差带半宽
  #[inline]
  pub fn slack(&self) -> f64 {
    self.hi - self.target
  }
}
