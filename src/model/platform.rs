use crate::model::env::Env;

/// Coarse platform classification used to pick separators and templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
}

impl OsFamily {
    /// Resolve from the `KREW_OS` override if set, else from the host OS.
    pub fn resolve(env: &Env) -> Self {
        match env.os_override.as_deref().map(str::trim) {
            Some(os) if !os.is_empty() => Self::from_name(os),
            _ => Self::host(),
        }
    }

    pub fn host() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    fn from_name(os: &str) -> Self {
        if os == "windows" {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }

    /// Separator between entries of the command search path.
    pub fn search_path_separator(&self) -> char {
        match self {
            OsFamily::Windows => ';',
            OsFamily::Unix => ':',
        }
    }

    pub fn is_path_separator(&self, c: char) -> bool {
        match self {
            OsFamily::Windows => c == '\\' || c == '/',
            OsFamily::Unix => c == '/',
        }
    }
}
