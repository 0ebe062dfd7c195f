// Progress reporting sinks
// 进度报告输出

#![allow(clippy::cast_precision_loss)]

use std::io::Write;

use humansize::{BINARY, format_size};

use crate::{Band, Candidate, Constraint, Result, Tuned};

const WIDTH: usize = 80;
const KIB: f64 = 1024.0;

/// Receives one record per evaluated candidate; never steers the search
/// 每个已评估候选收到一条记录；不影响搜索
pub trait Report {
  fn begin(&mut self, _constraint: Constraint, _band: &Band, _len: usize) -> Result<()> {
    Ok(())
  }

  fn record(&mut self, candidate: &Candidate) -> Result<()>;

  fn finish(&mut self, _tuned: &Tuned) -> Result<()> {
    Ok(())
  }
}

impl<R: Report + ?Sized> Report for &mut R {
  fn begin(&mut self, constraint: Constraint, band: &Band, len: usize) -> Result<()> {
    (**self).begin(constraint, band, len)
  }

  fn record(&mut self, candidate: &Candidate) -> Result<()> {
    (**self).record(candidate)
  }

  fn finish(&mut self, tuned: &Tuned) -> Result<()> {
    (**self).finish(tuned)
  }
}

/// Discards everything
/// 丢弃所有记录
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Report for Silent {
  fn record(&mut self, _candidate: &Candidate) -> Result<()> {
    Ok(())
  }
}

/// Keeps candidates in evaluation order
/// 按评估顺序保存候选
#[derive(Debug, Clone, Default)]
pub struct Trail {
  pub candidates: Vec<Candidate>,
}

impl Trail {
  pub fn epsilons(&self) -> Vec<usize> {
    self.candidates.iter().map(|c| c.epsilon).collect()
  }
}

impl Report for Trail {
  fn record(&mut self, candidate: &Candidate) -> Result<()> {
    self.candidates.push(*candidate);
    Ok(())
  }
}

/// Fixed-width progress table
/// 定宽进度表
#[derive(Debug)]
pub struct Table<W: Write> {
  out: W,
}

impl<W: Write> Table<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn rule(&mut self) -> Result<()> {
    writeln!(self.out, "{}", "-".repeat(WIDTH))?;
    Ok(())
  }
}

impl<W: Write> Report for Table<W> {
  fn begin(&mut self, constraint: Constraint, band: &Band, len: usize) -> Result<()> {
    writeln!(self.out, "Dataset: {len} entries")?;
    match constraint {
      Constraint::Time(ns) => writeln!(self.out, "Max time: {ns:.0}±{:.0} ns", band.slack())?,
      Constraint::Space(bytes) => writeln!(
        self.out,
        "Max space: {}±{:.0} KiB",
        bytes >> 10,
        band.slack() / KIB
      )?,
    }
    self.rule()?;
    writeln!(
      self.out,
      "{:<19} {:<19} {:<19} {:<19}",
      "Epsilon", "Construction (s)", "Space (KiB)", "Query (ns)"
    )?;
    self.rule()
  }

  fn record(&mut self, c: &Candidate) -> Result<()> {
    writeln!(
      self.out,
      "{:<19} {:<19.6} {:<19.2} {:<19.1}",
      c.epsilon,
      c.build.as_secs_f64(),
      c.space as f64 / KIB,
      c.query_ns
    )?;
    self.out.flush()?;
    Ok(())
  }

  fn finish(&mut self, tuned: &Tuned) -> Result<()> {
    self.rule()?;
    let best = &tuned.best;
    writeln!(
      self.out,
      "Best: epsilon {} | {} | {:.1} ns | {} ({} evaluations)",
      best.epsilon,
      format_size(best.space, BINARY),
      best.query_ns,
      tuned.status.as_str(),
      tuned.evaluations
    )?;
    self.out.flush()?;
    Ok(())
  }
}
