//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "TWR_SW_ROOT";

/// Get the root directory of the software, as given by the `TWR_SW_ROOT`
/// environment variable.
///
/// The parameter and session directories are resolved relative to this root.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
