//! Runtime configuration read from the environment

use std::path::PathBuf;

/// Path to a local copy of the Hipparcos main catalog (`hip_main.dat`)
pub const HIP_MAIN_DAT_ENV: &str = "JYOTISHGANIT_HIP_MAIN_DAT";

/// Shorter name for the same setting, read when the main one is unset
pub const HIP_MAIN_DAT_ENV_FALLBACK: &str = "JYOTISH_HIP_MAIN_DAT";

/// Directory holding Swiss Ephemeris data files (`*.se1`)
pub const EPHE_PATH_ENV: &str = "JYOTISH_EPHE_PATH";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Local star catalog substituted for the remote Hipparcos URL
    pub hip_main_dat: Option<PathBuf>,
    /// Swiss Ephemeris file directory; Moshier analytical ephemeris when unset
    pub ephe_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            hip_main_dat: hip_main_dat(),
            ephe_path: env_path(EPHE_PATH_ENV),
        }
    }
}

/// Trimmed, non-empty value of a path-valued variable
pub fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Local Hipparcos catalog path from either variable
pub fn hip_main_dat() -> Option<PathBuf> {
    env_path(HIP_MAIN_DAT_ENV).or_else(|| env_path(HIP_MAIN_DAT_ENV_FALLBACK))
}
