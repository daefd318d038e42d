use std::path::PathBuf;

use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_STEP_LIMIT: usize = 10_000;
pub const DEFAULT_HISTORY: &str = "/tmp/lambda.history";

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` reduces without a budget.
    pub step_limit: Option<usize>,
    pub history: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
            history: Some(PathBuf::from(DEFAULT_HISTORY)),
            log_level: LevelFilter::WARN,
        }
    }
}

impl Config {
    /// `0` means unbounded.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = (limit > 0).then(|| limit);
        self
    }

    /// Each `-v` raises the level by one, starting from `WARN`.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.log_level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        self
    }
}
