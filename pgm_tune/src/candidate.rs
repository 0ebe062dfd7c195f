// Candidate evaluation and tuning outcome
// 候选评估与调优结果

use std::time::Duration;

/// Measured metrics of one epsilon
/// 单个 epsilon 的测量指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
  pub epsilon: usize,
  /// Construction wall time / 构建耗时
  pub build: Duration,
  /// Index footprint in bytes / 索引占用字节数
  pub space: usize,
  /// Average query time in nanoseconds / 平均查询耗时（纳秒）
  pub query_ns: f64,
}

/// How the returned candidate relates to the constraint
/// 返回的候选与约束的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// Constrained metric inside the tolerance band
  /// 受约束指标位于容差带内
  Satisfied,
  /// Never inside the band, but the best candidate stays under budget
  /// 未进入容差带，但最佳候选未超预算
  Relaxed,
  /// Every candidate exceeded the band; best is the one at the cheapest bound
  /// 所有候选均超出容差带；返回最省边界上的候选
  Infeasible,
}

impl Status {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Satisfied => "satisfied",
      Self::Relaxed => "under budget, outside tolerance",
      Self::Infeasible => "constraint not satisfiable within tolerance",
    }
  }
}

/// Result of one tuning run
/// 一次调优运行的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuned {
  pub best: Candidate,
  pub status: Status,
  /// Oracle invocations / 测量次数
  pub evaluations: usize,
}

impl Tuned {
  #[inline]
  pub fn is_satisfied(&self) -> bool {
    self.status == Status::Satisfied
  }
}
