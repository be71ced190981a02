use std::fmt;

use crate::model::env::Env;

/// The user's login shell, as far as the setup instructions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellKind {
    Zsh,
    Bash,
    Fish,
    #[default]
    Other,
}

impl ShellKind {
    pub fn resolve(env: &Env) -> Self {
        env.shell.as_deref().map(Self::parse).unwrap_or_default()
    }

    /// Match on the executable's base name, so `/usr/local/bin/zsh` and
    /// `rbash` resolve the same way as `zsh` and `bash`.
    pub fn parse(shell: &str) -> Self {
        let name = shell
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        if name.ends_with("zsh") {
            ShellKind::Zsh
        } else if name.ends_with("bash") {
            ShellKind::Bash
        } else if name.ends_with("fish") {
            ShellKind::Fish
        } else {
            ShellKind::Other
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellKind::Zsh => "zsh",
            ShellKind::Bash => "bash",
            ShellKind::Fish => "fish",
            ShellKind::Other => "other",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
