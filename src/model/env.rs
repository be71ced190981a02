use std::env;
use std::ffi::OsString;

/// Overrides the detected OS family. `windows` forces Windows, anything else Unix.
pub const OS_OVERRIDE_VAR: &str = "KREW_OS";
pub const SHELL_VAR: &str = "SHELL";
pub const SEARCH_PATH_VAR: &str = "PATH";

/// Environment values the setup advisor reads.
///
/// Captured once from the process (or built directly in tests) and passed to
/// every check so that nothing downstream touches process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    pub os_override: Option<String>,
    pub shell: Option<String>,
    pub search_path: Option<OsString>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            os_override: env::var(OS_OVERRIDE_VAR).ok(),
            shell: env::var(SHELL_VAR).ok(),
            search_path: env::var_os(SEARCH_PATH_VAR),
        }
    }
}

#[cfg(test)]
impl Env {
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os_override = Some(os.into());
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }
}
