//! Filesystem layout of the plugin manager installation.
//!
//! Only the root and the bin directory matter to the setup advisor. The root
//! is resolved once at startup from, in order of priority:
//! 1. an explicit `--root` argument
//! 2. the `KREW_ROOT` environment variable
//! 3. `general.root` from configuration (default `~/.krew`)

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const ROOT_OVERRIDE_VAR: &str = "KREW_ROOT";

const BIN_DIR: &str = "bin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// `~` was used but the home directory is unknown.
    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("root path cannot be empty")]
    EmptyPath,
}

/// Root and derived directories of an installation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrewPaths {
    base: PathBuf,
}

impl KrewPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    /// Directory holding plugin executables, expected to be on `PATH`.
    pub fn bin_path(&self) -> PathBuf {
        self.base.join(BIN_DIR)
    }
}

/// Where the root directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Explicit,
    EnvVar,
    Config,
}

#[derive(Debug, Clone)]
pub struct RootResolution {
    pub paths: KrewPaths,
    pub source: RootSource,
}

pub fn resolve_root(
    explicit: Option<&Path>,
    configured: &str,
) -> Result<RootResolution, PathError> {
    let env_root = env::var(ROOT_OVERRIDE_VAR).ok();
    resolve_root_from(explicit, env_root.as_deref(), configured, home_dir().as_deref())
}

fn resolve_root_from(
    explicit: Option<&Path>,
    env_root: Option<&str>,
    configured: &str,
    home: Option<&Path>,
) -> Result<RootResolution, PathError> {
    if let Some(path) = explicit {
        return Ok(RootResolution {
            paths: KrewPaths::new(expand_tilde(&path.to_string_lossy(), home)?),
            source: RootSource::Explicit,
        });
    }

    if let Some(root) = env_root.filter(|root| !root.trim().is_empty()) {
        return Ok(RootResolution {
            paths: KrewPaths::new(expand_tilde(root, home)?),
            source: RootSource::EnvVar,
        });
    }

    Ok(RootResolution {
        paths: KrewPaths::new(expand_tilde(configured, home)?),
        source: RootSource::Config,
    })
}

pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

fn expand_tilde(path: &str, home: Option<&Path>) -> Result<PathBuf, PathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    let home = home.ok_or(PathError::NoHomeDir)?;
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        return Ok(home.to_path_buf());
    }
    Ok(home.join(rest))
}
