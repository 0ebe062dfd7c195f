// pgm_tune command line driver
// pgm_tune 命令行入口

use std::{env, io, process::ExitCode};

use clap::Parser;
use log::info;
use pgm_tune::{Cli, Conf, PgmBuilder, Probe, QueryBench, Result, Table, Tuner, Workload, load};

const RUST_LOG: &str = "RUST_LOG";

fn main() -> ExitCode {
  let cli = Cli::parse();
  // The logger reads its filter from RUST_LOG once, in init
  // 日志器仅在 init 时读取 RUST_LOG
  if let Some(filter) = cli.log_filter(env::var_os(RUST_LOG).is_some()) {
    // SAFETY: no other thread exists yet
    unsafe { env::set_var(RUST_LOG, filter) };
  }
  log_init::init();

  match cli.conf().and_then(|conf| run(&conf)) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn run(conf: &Conf) -> Result<()> {
  let mut data = load(&conf.file, conf.format)?;
  data.sort_unstable();
  let bracket = conf.bracket(data.len())?;
  info!(
    "{} keys, epsilon in [{}, {}]",
    data.len(),
    bracket.lo(),
    bracket.hi()
  );

  let workload = Workload::sample(&data, conf.queries, conf.seed);
  let bench = QueryBench::new(workload, conf.warmup, conf.rounds)?;
  let oracle = Probe::new(PgmBuilder::default(), bench);
  let mut tuner = Tuner::new(oracle, Table::new(io::stdout().lock())).with_stop(conf.stop);

  tuner.tune(
    conf.constraint,
    conf.tolerance,
    &data,
    bracket.lo(),
    bracket.hi(),
  )?;
  Ok(())
}
