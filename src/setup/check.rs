use std::fs;
use std::io;
use std::path::Path;

use crate::model::env::Env;
use crate::model::paths::KrewPaths;
use crate::model::platform::OsFamily;

/// Outcome of probing the installation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootState {
    Missing,
    Present,
}

impl RootState {
    fn probe(root: &Path) -> Self {
        match fs::metadata(root) {
            Ok(_) => RootState::Present,
            Err(err) => Self::from_probe_error(root, &err),
        }
    }

    /// Anything other than "not found" counts as present.
    fn from_probe_error(root: &Path, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            return RootState::Missing;
        }

        tracing::warn!(
            "cannot probe {}: {err}; assuming an existing installation",
            root.display()
        );
        RootState::Present
    }
}

/// Whether the setup reminder should be suppressed.
///
/// True when the bin directory is on the search path. Otherwise the answer
/// depends on whether the root exists: a missing root means nothing has been
/// installed yet, so there is nothing to warn about, while an existing root
/// means a previous run already had the chance to surface the instructions.
/// So `false` means "not on PATH and installed", not merely "not on PATH".
///
/// `PATH` is always read with the host's conventions; `KREW_OS` only affects
/// which instructions get written.
pub fn is_bin_dir_usable(paths: &KrewPaths, env: &Env) -> bool {
    let os = OsFamily::host();
    let bin = paths.bin_path();

    if search_path_contains(env, os, &bin) {
        tracing::debug!("{} found on PATH", bin.display());
        return true;
    }

    match RootState::probe(paths.base_path()) {
        RootState::Missing => {
            tracing::debug!(
                "{} does not exist yet, treating as first run",
                paths.base_path().display()
            );
            true
        }
        RootState::Present => {
            tracing::debug!("{} not on PATH", bin.display());
            false
        }
    }
}

fn search_path_contains(env: &Env, os: OsFamily, dir: &Path) -> bool {
    let Some(search_path) = env.search_path.as_ref() else {
        return false;
    };

    let wanted = normalize(&dir.to_string_lossy(), os);
    search_path
        .to_string_lossy()
        .split(os.search_path_separator())
        .filter(|entry| !entry.is_empty())
        .any(|entry| normalize(entry, os) == wanted)
}

/// Drop trailing separators; on Windows also fold case and slash direction.
fn normalize(dir: &str, os: OsFamily) -> String {
    let trimmed = dir.trim_end_matches(|c| os.is_path_separator(c));
    let trimmed = if trimmed.is_empty() && !dir.is_empty() {
        &dir[..1]
    } else {
        trimmed
    };

    match os {
        OsFamily::Windows => trimmed.replace('/', "\\").to_lowercase(),
        OsFamily::Unix => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unix_env(search_path: &str) -> Env {
        Env::default().with_os("linux").with_search_path(search_path)
    }

    /// Search path for the host OS, so tempdir paths split correctly.
    fn host_env(entries: &[PathBuf]) -> Env {
        let joined = std::env::join_paths(entries).unwrap();
        Env::default().with_search_path(joined)
    }

    fn on_path(bin: PathBuf) -> Env {
        host_env(&[PathBuf::from("/usr/local/bin"), bin, PathBuf::from("/usr/bin")])
    }

    fn elsewhere() -> Env {
        host_env(&[PathBuf::from("/usr/bin"), PathBuf::from("/bin")])
    }

    #[test]
    fn first_run_is_usable() {
        let dir = tempfile::tempdir().unwrap();
        let paths = KrewPaths::new(dir.path().join("does-not-exist"));

        assert!(is_bin_dir_usable(&paths, &elsewhere()));
    }

    #[test]
    fn existing_root_without_path_entry_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        let paths = KrewPaths::new(dir.path());

        assert!(!is_bin_dir_usable(&paths, &elsewhere()));
    }

    #[test]
    fn existing_root_with_contents_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin").join("kubectl-krew"), "").unwrap();
        let paths = KrewPaths::new(dir.path());

        assert!(!is_bin_dir_usable(&paths, &elsewhere()));
    }

    #[test]
    fn path_entry_wins_over_root_state() {
        let dir = tempfile::tempdir().unwrap();

        let existing = KrewPaths::new(dir.path());
        assert!(is_bin_dir_usable(&existing, &on_path(existing.bin_path())));

        let missing = KrewPaths::new(dir.path().join("missing"));
        assert!(is_bin_dir_usable(&missing, &on_path(missing.bin_path())));
    }

    #[test]
    fn trailing_separator_still_matches() {
        let dir = tempfile::tempdir().unwrap();
        let paths = KrewPaths::new(dir.path());
        let entry = format!("{}{}", paths.bin_path().display(), std::path::MAIN_SEPARATOR);

        assert!(is_bin_dir_usable(&paths, &host_env(&[PathBuf::from(entry)])));
    }

    #[test]
    fn unset_or_empty_search_path_falls_back_to_probe() {
        let dir = tempfile::tempdir().unwrap();
        let paths = KrewPaths::new(dir.path());

        assert!(!is_bin_dir_usable(&paths, &Env::default()));
        assert!(!is_bin_dir_usable(&paths, &Env::default().with_search_path("")));
        assert!(!is_bin_dir_usable(&paths, &Env::default().with_search_path(";:;")));
    }

    #[test]
    fn os_override_does_not_change_membership() {
        let dir = tempfile::tempdir().unwrap();
        let paths = KrewPaths::new(dir.path());
        let env = on_path(paths.bin_path());

        assert!(is_bin_dir_usable(&paths, &env));
        assert!(is_bin_dir_usable(&paths, &env.clone().with_os("windows")));
        assert!(is_bin_dir_usable(&paths, &env.with_os("linux")));

        let absent = elsewhere();
        assert!(!is_bin_dir_usable(&paths, &absent.clone().with_os("windows")));
        assert!(!is_bin_dir_usable(&paths, &absent.with_os("linux")));
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_entry() {
        let bin = Path::new("/opt/krew/bin");
        assert!(!search_path_contains(&unix_env(" /opt/krew/bin"), OsFamily::Unix, bin));
        assert!(!search_path_contains(&unix_env("/opt/krew/bin "), OsFamily::Unix, bin));
        assert!(search_path_contains(&unix_env("/usr/bin:/opt/krew/bin"), OsFamily::Unix, bin));
    }

    #[test]
    fn unix_comparison_is_case_sensitive() {
        assert!(!search_path_contains(
            &unix_env("/Home/Kube/.krew/bin"),
            OsFamily::Unix,
            Path::new("/home/kube/.krew/bin"),
        ));
    }

    #[test]
    fn windows_comparison_folds_case_and_slashes() {
        let env = Env::default()
            .with_os("windows")
            .with_search_path("C:\\Windows;c:/users/kube/.krew/BIN/;C:\\Tools");

        assert!(search_path_contains(
            &env,
            OsFamily::Windows,
            &PathBuf::from("C:\\Users\\Kube\\.krew\\bin"),
        ));
    }

    #[test]
    fn windows_splits_on_semicolon_only() {
        let env = Env::default().with_search_path("C:\\a:C:\\b");
        assert!(!search_path_contains(
            &env,
            OsFamily::Windows,
            Path::new("C:\\b")
        ));
    }

    #[test]
    fn normalize_keeps_root() {
        assert_eq!(normalize("/", OsFamily::Unix), "/");
        assert_eq!(normalize("///", OsFamily::Unix), "/");
        assert_eq!(normalize("/opt/krew/bin//", OsFamily::Unix), "/opt/krew/bin");
        assert_eq!(normalize("", OsFamily::Unix), "");
    }

    #[test]
    fn probe_errors_other_than_not_found_count_as_present() {
        let root = Path::new("/unreadable/.krew");
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let missing = io::Error::from(io::ErrorKind::NotFound);

        assert_eq!(RootState::from_probe_error(root, &denied), RootState::Present);
        assert_eq!(RootState::from_probe_error(root, &missing), RootState::Missing);
    }

    #[test]
    fn root_below_a_file_counts_as_present() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();

        // ENOTDIR on Unix, not NotFound.
        #[cfg(unix)]
        assert_eq!(RootState::probe(&file.join("root")), RootState::Present);
        assert_eq!(RootState::probe(&file), RootState::Present);
    }
}
