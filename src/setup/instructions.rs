use crate::model::env::Env;
use crate::model::paths::KrewPaths;
use crate::model::platform::OsFamily;
use crate::model::shell::ShellKind;

const BIN_PLACEHOLDER: &str = "{bin}";

const WINDOWS: &str = r#"To be able to run kubectl plugins, you need to add the
"%USERPROFILE%\.krew\bin" directory to your PATH environment variable
(System Properties > Environment Variables > Path > Edit)
and restart your shell."#;

const UNIX: &str = r#"To be able to run kubectl plugins, you need to add
the "{bin}" directory to your PATH:

{snippet}

Then reload that file (or restart your shell)."#;

const ZSH: &str = r#"  Add the following to your ~/.zshrc:
    export PATH="{bin}:$PATH""#;

const BASH: &str = r#"  Add the following to your ~/.bash_profile or ~/.bashrc:
    export PATH="{bin}:$PATH""#;

const FISH: &str = r#"  Add the following to your config.fish:
    set -gx PATH $PATH "{bin}""#;

const GENERIC: &str = r#"  Add the following to your ~/.bash_profile, ~/.bashrc, or ~/.zshrc:
    export PATH="{bin}:$PATH""#;

impl ShellKind {
    fn snippet(&self) -> &'static str {
        match self {
            ShellKind::Zsh => ZSH,
            ShellKind::Bash => BASH,
            ShellKind::Fish => FISH,
            ShellKind::Other => GENERIC,
        }
    }
}

/// Text telling the user how to put the bin directory on their `PATH`.
pub fn compose_instructions(paths: &KrewPaths, env: &Env) -> String {
    match OsFamily::resolve(env) {
        OsFamily::Windows => WINDOWS.to_string(),
        OsFamily::Unix => {
            let shell = ShellKind::resolve(env);
            tracing::debug!("composing setup instructions for {shell}");

            let bin = paths.bin_path();
            let bin = bin.to_string_lossy();
            UNIX.replace("{snippet}", shell.snippet())
                .replace(BIN_PLACEHOLDER, &bin)
        }
    }
}
