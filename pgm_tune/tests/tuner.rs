//! Search engine tests against synthetic oracles
//! 使用合成预言机测试搜索引擎

use std::time::Duration;

use aok::{OK, Void};
use log::trace;
use pgm_tune::{
  Bracket, Candidate, Error, Oracle, Result, Silent, Status, Stop, Trail, Tuner,
};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

/// Oracle computing metrics from closures of epsilon
/// 由 epsilon 闭包计算指标的预言机
struct Stub<T, S> {
  time: T,
  space: S,
  calls: usize,
}

impl<T, S> Stub<T, S>
where
  T: Fn(usize) -> f64,
  S: Fn(usize) -> usize,
{
  fn new(time: T, space: S) -> Self {
    Self {
      time,
      space,
      calls: 0,
    }
  }
}

impl<T, S> Oracle for Stub<T, S>
where
  T: Fn(usize) -> f64,
  S: Fn(usize) -> usize,
{
  fn measure(&mut self, _data: &[i64], epsilon: usize) -> Result<Candidate> {
    self.calls += 1;
    Ok(Candidate {
      epsilon,
      build: Duration::from_micros(epsilon as u64),
      space: (self.space)(epsilon),
      query_ns: (self.time)(epsilon),
    })
  }
}

/// query_ns = 100 + eps / 1000, space = 8_000_000 / eps
fn curve() -> Stub<impl Fn(usize) -> f64, impl Fn(usize) -> usize> {
  Stub::new(|e| 100.0 + e as f64 / 1000.0, |e| 8_000_000 / e)
}

fn dataset() -> Vec<i64> {
  (1..=1_000_000).collect()
}

#[test]
fn test_space_given_time_scenario() -> Void {
  let data = dataset();
  let mut tuner = Tuner::new(curve(), Trail::default());
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 500_000)?;

  assert_eq!(tuned.status, Status::Satisfied);
  assert_eq!(tuned.best.epsilon, 102_000);
  assert_eq!(tuned.best.space, 78);
  assert!((198.0..=202.0).contains(&tuned.best.query_ns));

  let bound = Bracket::new(16, 500_000)?.max_evals();
  assert!(tuned.evaluations <= bound);
  assert_eq!(tuned.evaluations, tuner.oracle().calls);
  assert_eq!(tuner.report().candidates.len(), tuned.evaluations);
  assert_eq!(tuner.report().epsilons()[0], Bracket::new(16, 500_000)?.mid());

  trace!("scenario: {tuned:?}");
  OK
}

#[test]
fn test_first_in_band() -> Void {
  let data = dataset();
  let mut tuner = Tuner::new(curve(), Trail::default()).with_stop(Stop::FirstInBand);
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 500_000)?;

  assert_eq!(tuned.status, Status::Satisfied);
  assert!((98_000..=102_000).contains(&tuned.best.epsilon));
  assert!((78..=82).contains(&tuned.best.space));
  // The run stops on the in-band candidate
  assert_eq!(
    tuner.report().candidates.last().map(|c| c.epsilon),
    Some(tuned.best.epsilon)
  );

  let (stub, _) = tuner.into_parts();
  let mut exhaustive = Tuner::new(curve(), Silent);
  let full = exhaustive.minimize_space_given_time(200.0, 0.01, &data, 16, 500_000)?;
  assert!(stub.calls < full.evaluations);
  OK
}

#[test]
fn test_minimal_space_in_band() -> Void {
  // time = eps ns, band [900, 1100]: the largest in-band epsilon is 1100
  let data = vec![1i64];
  for (lo, hi) in [(16usize, 5_000usize), (1, 1_101), (900, 1_100), (1_000, 4_096)] {
    let mut tuner = Tuner::new(
      Stub::new(|e| e as f64, |e| 1_000_000 / e),
      Silent,
    );
    let tuned = tuner.minimize_space_given_time(1_000.0, 0.1, &data, lo, hi)?;
    assert_eq!(tuned.status, Status::Satisfied, "[{lo}, {hi}]");
    assert_eq!(tuned.best.epsilon, 1_100, "[{lo}, {hi}]");
    assert!(tuned.evaluations <= Bracket::new(lo, hi)?.max_evals());
  }
  OK
}

#[test]
fn test_time_given_space() -> Void {
  // space = 1_000_000 / eps, band [9_000, 11_000]: smallest epsilon with space <= 11_000 is 91
  let data = vec![1i64, 2, 3];
  let mut tuner = Tuner::new(
    Stub::new(|e| 50.0 + e as f64, |e| 1_000_000 / e),
    Trail::default(),
  );
  let tuned = tuner.minimize_time_given_space(10_000, 0.1, &data, 16, 100_000)?;

  assert_eq!(tuned.status, Status::Satisfied);
  assert_eq!(tuned.best.epsilon, 91);
  assert_eq!(tuned.best.space, 10_989);
  assert!(tuned.evaluations <= Bracket::new(16, 100_000)?.max_evals());
  OK
}

#[test]
fn test_infeasible_time() -> Void {
  // Every epsilon is slower than the band: answer the fastest one, lo
  let data = vec![1i64];
  let mut tuner = Tuner::new(Stub::new(|e| 500.0 + e as f64, |e| 10_000 / e), Trail::default());
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 4_000)?;

  assert_eq!(tuned.status, Status::Infeasible);
  assert!(!tuned.is_satisfied());
  assert_eq!(tuned.best.epsilon, 16);
  assert_eq!(tuner.report().candidates.last().map(|c| c.epsilon), Some(16));
  OK
}

#[test]
fn test_infeasible_flat_time() -> Void {
  // Constant or jagged times above the band still answer lo, the last step
  let data = vec![1i64];
  let flat = Stub::new(|_| 500.0, |e| 10_000 / e);
  let jagged = Stub::new(|e| if e % 3 == 0 { 900.0 } else { 300.0 }, |e| 10_000 / e);

  let mut tuner = Tuner::new(flat, Trail::default());
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 4_000)?;
  assert_eq!(tuned.status, Status::Infeasible);
  assert_eq!(tuned.best.epsilon, 16);
  assert_eq!(tuner.report().epsilons()[0], 2_008);
  assert_eq!(tuner.report().epsilons().last(), Some(&16));

  let mut tuner = Tuner::new(jagged, Silent);
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 4_000)?;
  assert_eq!(tuned.status, Status::Infeasible);
  assert_eq!(tuned.best.epsilon, 16);
  OK
}

#[test]
fn test_infeasible_flat_space() -> Void {
  let data = vec![1i64];
  let mut tuner = Tuner::new(Stub::new(|e| e as f64, |_| 1 << 20), Silent);
  let tuned = tuner.minimize_time_given_space(1_000, 0.1, &data, 16, 4_000)?;
  assert_eq!(tuned.status, Status::Infeasible);
  assert_eq!(tuned.best.epsilon, 4_000);
  OK
}

#[test]
fn test_infeasible_space() -> Void {
  // Every epsilon is larger than the band: answer the smallest index, hi
  let data = vec![1i64];
  let mut tuner = Tuner::new(Stub::new(|e| e as f64, |e| 1_000_000 - e), Silent);
  let tuned = tuner.minimize_time_given_space(1_000, 0.5, &data, 16, 4_000)?;

  assert_eq!(tuned.status, Status::Infeasible);
  assert_eq!(tuned.best.epsilon, 4_000);
  OK
}

#[test]
fn test_relaxed() -> Void {
  // Even the largest epsilon is faster than the band: keep it, it uses the least space
  let data = vec![1i64];
  let mut tuner = Tuner::new(Stub::new(|e| 10.0 + e as f64 / 1e6, |e| 1_000_000 / e), Silent);
  let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, 16, 4_000)?;

  assert_eq!(tuned.status, Status::Relaxed);
  assert!(!tuned.is_satisfied());
  assert_eq!(tuned.best.epsilon, 4_000);
  OK
}

#[test]
fn test_single_epsilon() -> Void {
  let data = vec![1i64];
  for target in [1.0, 64.0, 1e9] {
    let mut tuner = Tuner::new(Stub::new(|_| 64.0, |_| 64), Trail::default());
    let tuned = tuner.minimize_space_given_time(target, 0.0, &data, 64, 64)?;
    assert_eq!(tuned.evaluations, 1);
    assert_eq!(tuned.best.epsilon, 64);
    assert_eq!(tuner.report().epsilons(), vec![64]);
  }
  OK
}

#[test]
fn test_invalid_inputs_measure_nothing() {
  let data = vec![1i64];
  let mut tuner = Tuner::new(Stub::new(|e| e as f64, |e| e), Trail::default());

  assert!(matches!(
    tuner.minimize_space_given_time(100.0, 0.1, &data, 10, 5),
    Err(Error::InvalidRange { lo: 10, hi: 5 })
  ));
  assert!(matches!(
    tuner.minimize_space_given_time(100.0, 0.1, &[], 1, 5),
    Err(Error::InsufficientData)
  ));
  assert!(matches!(
    tuner.minimize_time_given_space(100, 1.5, &data, 1, 5),
    Err(Error::InvalidTolerance(_))
  ));
  assert!(matches!(
    tuner.minimize_space_given_time(-1.0, 0.1, &data, 1, 5),
    Err(Error::InvalidTarget(_))
  ));
  assert_eq!(tuner.oracle().calls, 0);
  assert!(tuner.report().candidates.is_empty());
}

#[test]
fn test_oracle_error_aborts() {
  struct Broken;
  impl Oracle for Broken {
    fn measure(&mut self, _data: &[i64], _epsilon: usize) -> Result<Candidate> {
      Err(Error::Pgm(pgm::Error::EmptyData))
    }
  }
  let mut tuner = Tuner::new(Broken, Silent);
  assert!(matches!(
    tuner.minimize_space_given_time(100.0, 0.1, &[1], 1, 100),
    Err(Error::Pgm(_))
  ));
}

#[test]
fn test_non_monotone_terminates() -> Void {
  // Saw-tooth times: no monotonicity, the bracket still bounds the work
  let data = vec![1i64];
  let mut tuner = Tuner::new(
    Stub::new(|e| if e % 2 == 0 { 10.0 } else { 1e6 }, |e| 1_000_000 / e),
    Trail::default(),
  );
  let tuned = tuner.minimize_space_given_time(1_000.0, 0.05, &data, 1, 1 << 20)?;
  assert!(tuned.evaluations <= Bracket::new(1, 1 << 20)?.max_evals());
  assert!(
    tuner
      .report()
      .candidates
      .iter()
      .any(|c| c.epsilon == tuned.best.epsilon)
  );
  OK
}

mod prop {
  use proptest::prelude::*;

  use super::*;

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Termination bound and exact boundary for any bracket and threshold
    /// 任意区间与阈值下的终止上界与精确边界
    #[test]
    fn prop_time_boundary(lo in 1usize..10_000, width in 1usize..1_000_000, target in 1u32..2_000_000) {
      let hi = lo + width - 1;
      let data = [0i64];
      let mut tuner = Tuner::new(Stub::new(|e| e as f64, |e| 1_000_000_000 / e), Silent);
      let tuned = tuner.minimize_space_given_time(f64::from(target), 0.0, &data, lo, hi).unwrap();

      prop_assert!(tuned.evaluations <= Bracket::new(lo, hi).unwrap().max_evals());
      let target = target as usize;
      if target < lo {
        prop_assert_eq!(tuned.status, Status::Infeasible);
        prop_assert_eq!(tuned.best.epsilon, lo);
      } else if target > hi {
        prop_assert_eq!(tuned.status, Status::Relaxed);
        prop_assert_eq!(tuned.best.epsilon, hi);
      } else {
        prop_assert_eq!(tuned.status, Status::Satisfied);
        prop_assert_eq!(tuned.best.epsilon, target);
      }
    }

    /// Arbitrary times above the band always answer lo
    /// 任意超出容差带的时间总是返回 lo
    #[test]
    fn prop_infeasible_is_lo(lo in 1usize..10_000, width in 1usize..100_000, salt in any::<u64>()) {
      let hi = lo + width - 1;
      let data = [0i64];
      let time = move |e: usize| {
        300.0 + ((e as u64 ^ salt).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 40) as f64
      };
      let mut tuner = Tuner::new(Stub::new(time, |e| e), Silent);
      let tuned = tuner.minimize_space_given_time(200.0, 0.01, &data, lo, hi).unwrap();
      prop_assert_eq!(tuned.status, Status::Infeasible);
      prop_assert_eq!(tuned.best.epsilon, lo);
    }

    /// Mirrored oracles give mirrored answers
    /// 镜像预言机给出镜像结果
    #[test]
    fn prop_symmetry(lo in 1usize..1_000, width in 1usize..100_000, pick in 0.0f64..1.0, tol in 0.0f64..0.2) {
      let hi = lo + width - 1;
      let data = [0i64];
      let target = lo + ((width - 1) as f64 * pick) as usize;

      // Time grows with epsilon
      let mut by_time = Tuner::new(Stub::new(|e| e as f64, |e| hi + lo - e + 1), Silent);
      let a = by_time.minimize_space_given_time(target as f64, tol, &data, lo, hi).unwrap();

      // Mirror: space shrinks with epsilon along the reflected axis
      let mut by_space = Tuner::new(Stub::new(|e| e as f64, move |e| hi + lo - e), Silent);
      let b = by_space.minimize_time_given_space(hi + lo - target, tol, &data, lo, hi).unwrap();

      prop_assert_eq!(a.status, Status::Satisfied);
      prop_assert_eq!(b.status, Status::Satisfied);
      let a_edge = (target as f64 * (1.0 + tol)).floor() as usize;
      prop_assert_eq!(a.best.epsilon, a_edge.min(hi));
      let b_edge = ((hi + lo - target) as f64 * (1.0 + tol)).floor() as usize;
      prop_assert_eq!(b.best.epsilon, (hi + lo).saturating_sub(b_edge).max(lo));
    }
  }
}
