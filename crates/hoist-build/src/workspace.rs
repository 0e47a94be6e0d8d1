//! Output-directory cleanup.
//!
//! Cleanup runs before every dispatch and is configuration-driven: it is a
//! no-op unless `compilerOptions.deleteOutDir` resolves true for the target
//! application. Destructive operations validate the target first and refuse
//! system directories outright.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use hoist_config::{Configuration, resolve_or};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("output path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("refusing to delete system directory: {}", .0.display())]
    RefusedPath(PathBuf),

    #[error("I/O error during cleanup: {0}")]
    Io(#[from] std::io::Error),
}

/// Workspace-level filesystem side effects.
pub trait WorkspaceUtils: Send + Sync {
    /// Empty `out_dir` when the configuration enables it for `app_name`.
    fn delete_out_dir_if_enabled(
        &self,
        configuration: &Configuration,
        app_name: &str,
        out_dir: &Path,
    ) -> Result<(), WorkspaceError>;
}

#[derive(Debug, Clone, Default)]
pub struct OutputDirCleaner;

impl WorkspaceUtils for OutputDirCleaner {
    fn delete_out_dir_if_enabled(
        &self,
        configuration: &Configuration,
        app_name: &str,
        out_dir: &Path,
    ) -> Result<(), WorkspaceError> {
        let enabled = resolve_or(
            configuration,
            "compilerOptions.deleteOutDir",
            app_name,
            "deleteOutDir",
            &[],
            false,
        );
        if !enabled {
            debug!(app = app_name, "output cleanup disabled");
            return Ok(());
        }
        clean_dir(out_dir)
    }
}

/// Remove the contents of `dir`, keeping the directory itself. Creates the
/// directory when it does not exist yet.
fn clean_dir(dir: &Path) -> Result<(), WorkspaceError> {
    guard_path(dir)?;

    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(());
    }
    if !dir.is_dir() {
        return Err(WorkspaceError::NotADirectory(dir.to_path_buf()));
    }

    debug!(dir = %dir.display(), "emptying output directory");
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

const REFUSED_PATHS: &[&str] = &[
    "/", "/bin", "/boot", "/dev", "/etc", "/home", "/lib", "/lib64", "/proc", "/root", "/sbin",
    "/sys", "/usr", "/var",
];

fn guard_path(dir: &Path) -> Result<(), WorkspaceError> {
    let display = dir.to_string_lossy();
    if REFUSED_PATHS.contains(&display.as_ref()) {
        return Err(WorkspaceError::RefusedPath(dir.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;
    use tempfile::TempDir;

    fn config(delete_out_dir: bool) -> Configuration {
        Configuration::from_value(json!({
            "compilerOptions": { "deleteOutDir": delete_out_dir }
        }))
        .unwrap()
    }

    #[test]
    fn disabled_cleanup_is_a_noop() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir(&out).unwrap();
        File::create(out.join("stale.js")).unwrap();

        OutputDirCleaner
            .delete_out_dir_if_enabled(&config(false), "api", &out)
            .unwrap();
        assert!(out.join("stale.js").exists());
    }

    #[test]
    fn enabled_cleanup_empties_directory() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir(&out).unwrap();
        File::create(out.join("stale.js")).unwrap();
        fs::create_dir(out.join("chunks")).unwrap();

        OutputDirCleaner
            .delete_out_dir_if_enabled(&config(true), "api", &out)
            .unwrap();
        assert!(out.exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn per_app_override_enables_cleanup() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir(&out).unwrap();
        File::create(out.join("stale.js")).unwrap();

        let config = Configuration::from_value(json!({
            "compilerOptions": { "deleteOutDir": false },
            "projects": {
                "api": { "compilerOptions": { "deleteOutDir": true } }
            }
        }))
        .unwrap();

        OutputDirCleaner
            .delete_out_dir_if_enabled(&config, "api", &out)
            .unwrap();
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn missing_out_dir_is_created() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");

        OutputDirCleaner
            .delete_out_dir_if_enabled(&config(true), "api", &out)
            .unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn refuses_system_roots() {
        let err = clean_dir(Path::new("/usr")).unwrap_err();
        assert!(matches!(err, WorkspaceError::RefusedPath(_)));
    }

    #[test]
    fn file_at_out_dir_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        File::create(&out).unwrap();

        let err = OutputDirCleaner
            .delete_out_dir_if_enabled(&config(true), "api", &out)
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::NotADirectory(_)));
    }
}
