/// Run mode definitions
///
/// A run either walks the URL list one page at a time or hands it to a
/// bounded worker pool.
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// How the runner processes the URL list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum ScrapeMode {
    /// One URL at a time, results in input order
    Sequential,

    /// Bounded worker pool, results in completion order
    #[default]
    Parallel,
}

impl ScrapeMode {
    /// Returns the lowercase name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }

    /// Returns all run modes
    pub fn all_modes() -> [Self; 2] {
        [Self::Sequential, Self::Parallel]
    }
}

impl fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "Sequential"),
            Self::Parallel => write!(f, "Parallel"),
        }
    }
}

impl FromStr for ScrapeMode {
    type Err = String;

    /// Accepts the mode name or its menu number (`1` or `2`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "1" => Ok(Self::Sequential),
            "parallel" | "2" => Ok(Self::Parallel),
            other => Err(format!("unknown scrape mode '{}'", other)),
        }
    }
}
