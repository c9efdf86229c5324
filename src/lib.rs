// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod interrupt;
pub mod logging;
pub mod runner;
pub mod verdict;
pub mod workdir;

use std::time::Duration;

use tracing::debug;

use crate::cli::CliArgs;
use crate::errors::TrialrunError;

pub use crate::config::RunnerConfig;
pub use crate::runner::TestCase;
pub use crate::verdict::TestResult;

/// High-level entry point used by `main.rs`.
///
/// Loads the configuration, runs the single test case named on the command
/// line, prints the result line to stdout and returns the process exit code:
/// 0 for a good result, 1 otherwise, and 128 plus the signal number when the
/// run was interrupted.
pub async fn run(args: CliArgs) -> anyhow::Result<i32> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(secs) = args.timeout_secs {
        if secs == 0 {
            return Err(TrialrunError::Config(
                "--timeout-secs must be >= 1 (got 0)".to_string(),
            )
            .into());
        }
        config.timeout = Duration::from_secs(secs);
    }
    debug!(timeout_secs = config.timeout.as_secs(), "effective configuration");

    let test_case = TestCase::new(args.program, args.name);
    match test_case.run(&config).await {
        Ok(result) => {
            println!("{result}");
            Ok(if result.good() { 0 } else { 1 })
        }
        Err(TrialrunError::Interrupted(signo)) => {
            eprintln!("trialrun: interrupted by signal {signo}");
            Ok(128 + signo)
        }
        Err(err) => Err(err.into()),
    }
}
