// Space-time trade-off search over epsilon
// 基于 epsilon 的时空权衡搜索
//
// Bisection on "constrained metric <= band upper edge". Query time grows and
// space shrinks with epsilon, so the feasible epsilons form a prefix (time
// bound) or a suffix (space bound) of the bracket; the search walks toward the
// boundary of that region, where the unconstrained metric is smallest.
// 以"受约束指标 <= 容差带上沿"为谓词二分。查询时间随 epsilon 增大、空间随之减小，
// 可行 epsilon 构成区间前缀（时间约束）或后缀（空间约束）；搜索逼近该区域边界，此处另一指标最小。

use log::{debug, info, warn};

use crate::{
  Band, Bracket, Candidate, Constraint, Error, Oracle, Report, Result, Status, Tuned,
  constraint::Pos,
};

/// When a run may stop early
/// 何时可以提前结束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stop {
  /// Bisect to exhaustion, keep the last in-band candidate
  /// 二分至区间耗尽，保留最后一个带内候选
  #[default]
  Tightest,
  /// Return the first in-band candidate
  /// 返回第一个带内候选
  FirstInBand,
}

/// Tradeoff search engine
/// 权衡搜索引擎
#[derive(Debug)]
pub struct Tuner<O, R> {
  oracle: O,
  report: R,
  stop: Stop,
}

impl<O: Oracle, R: Report> Tuner<O, R> {
  pub fn new(oracle: O, report: R) -> Self {
    Self {
      oracle,
      report,
      stop: Stop::default(),
    }
  }

  pub fn with_stop(mut self, stop: Stop) -> Self {
    self.stop = stop;
    self
  }

  pub fn oracle(&self) -> &O {
    &self.oracle
  }

  pub fn report(&self) -> &R {
    &self.report
  }

  pub fn into_parts(self) -> (O, R) {
    (self.oracle, self.report)
  }

  /// Smallest index whose average query time stays within `target_ns` ± tolerance
  /// 平均查询时间不超过 `target_ns`（含容差）时的最小索引
  pub fn minimize_space_given_time(
    &mut self,
    target_ns: f64,
    tolerance: f64,
    data: &[i64],
    lo: usize,
    hi: usize,
  ) -> Result<Tuned> {
    self.tune(Constraint::Time(target_ns), tolerance, data, lo, hi)
  }

  /// Fastest index whose footprint stays within `target_bytes` ± tolerance
  /// 占用不超过 `target_bytes`（含容差）时的最快索引
  pub fn minimize_time_given_space(
    &mut self,
    target_bytes: usize,
    tolerance: f64,
    data: &[i64],
    lo: usize,
    hi: usize,
  ) -> Result<Tuned> {
    self.tune(Constraint::Space(target_bytes), tolerance, data, lo, hi)
  }

  /// Validate, then search. No candidate is measured unless every input is valid.
  /// 先校验再搜索。所有输入有效前不会测量任何候选。
  pub fn tune(
    &mut self,
    constraint: Constraint,
    tolerance: f64,
    data: &[i64],
    lo: usize,
    hi: usize,
  ) -> Result<Tuned> {
    let bracket = Bracket::new(lo, hi)?;
    let band = constraint.band(tolerance)?;
    if data.is_empty() {
      return Err(Error::InsufficientData);
    }

    self.report.begin(constraint, &band, data.len())?;
    let tuned = Search::new(constraint, band, bracket).run(
      &mut self.oracle,
      &mut self.report,
      data,
      self.stop,
    )?;
    self.report.finish(&tuned)?;

    let best = &tuned.best;
    if tuned.is_satisfied() {
      info!(
        "epsilon={} space={}B query={:.1}ns after {} evaluations",
        best.epsilon, best.space, best.query_ns, tuned.evaluations
      );
    } else {
      warn!(
        "{:?} {}: best effort epsilon={} space={}B query={:.1}ns",
        constraint,
        tuned.status.as_str(),
        best.epsilon,
        best.space,
        best.query_ns
      );
    }
    Ok(tuned)
  }
}

/// State of one run, dropped when it ends
/// 单次运行的状态，结束即释放
struct Search {
  constraint: Constraint,
  band: Band,
  bracket: Option<Bracket>,
  in_band: Option<Candidate>,
  feasible: Option<Candidate>,
  last: Option<Candidate>,
  evaluations: usize,
}

impl Search {
  fn new(constraint: Constraint, band: Band, bracket: Bracket) -> Self {
    Self {
      constraint,
      band,
      bracket: Some(bracket),
      in_band: None,
      feasible: None,
      last: None,
      evaluations: 0,
    }
  }

  fn run(
    mut self,
    oracle: &mut impl Oracle,
    report: &mut impl Report,
    data: &[i64],
    stop: Stop,
  ) -> Result<Tuned> {
    let (lo, hi) = self.bracket.map_or((0, 0), |b| (b.lo(), b.hi()));

    while let Some(bracket) = self.bracket {
      let epsilon = bracket.mid();
      let candidate = oracle.measure(data, epsilon)?;
      self.evaluations += 1;
      report.record(&candidate)?;

      let value = self.constraint.metric(&candidate);
      let pos = self.band.position(value);
      self.keep(candidate, pos);

      if pos == Pos::Within && stop == Stop::FirstInBand {
        debug!("eps={epsilon} value={value:.1} in band, stop");
        break;
      }

      let feasible = pos != Pos::Above;
      self.bracket = if feasible == self.constraint.larger_when_feasible() {
        bracket.above(epsilon)
      } else {
        bracket.below(epsilon)
      };
      debug!(
        "eps={epsilon} value={value:.1} {pos:?} [{:.1}, {:.1}] -> {:?}",
        self.band.lo, self.band.hi, self.bracket
      );
    }

    let evaluations = self.evaluations;
    // Nothing feasible means every step moved toward the cheapest bound (lo for
    // time, hi for space), so the last evaluation sits on it
    // 无可行候选时每一步都朝最省的边界移动（时间取 lo，空间取 hi），最后一次评估即在该边界上
    let (best, status) = match (self.in_band, self.feasible, self.last) {
      (Some(c), _, _) => (c, Status::Satisfied),
      (None, Some(c), _) => (c, Status::Relaxed),
      (None, None, Some(c)) => (c, Status::Infeasible),
      // A valid bracket is never empty, so at least one candidate exists
      // 有效区间非空，至少存在一个候选
      (None, None, None) => return Err(Error::InvalidRange { lo, hi }),
    };
    Ok(Tuned {
      best,
      status,
      evaluations,
    })
  }

  /// Most recent wins for in-band, feasible and last
  /// 带内、可行与最后一次均取最近值
  fn keep(&mut self, candidate: Candidate, pos: Pos) {
    if pos != Pos::Above {
      self.feasible = Some(candidate);
    }
    if pos == Pos::Within {
      self.in_band = Some(candidate);
    }
    self.last = Some(candidate);
  }
}
