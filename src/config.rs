use std::path::PathBuf;

/// Dataset read when `NBA_DATA_PATH` is not set.
pub const DEFAULT_DATA_PATH: &str = "nba_2013.csv";

/// Rows shown in the dataset head on the home page.
pub const HEAD_ROWS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Season file (NBA_DATA_PATH).
    pub data_path: PathBuf,
    /// Dump dataset exploration output at startup (DEBUG, any value).
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_path: var("NBA_DATA_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            debug: var("DEBUG").is_some(),
        }
    }
}
