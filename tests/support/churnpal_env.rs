//! A throwaway `CHURNPAL_CONFIG_HOME` for tests that go through the default
//! config and app folder.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use churnpal::app_dirs::{AppDirs, CONFIG_HOME_ENV};
use tempfile::TempDir;

// Env vars are process-wide; only one test may own the variable at a time.
static CONFIG_HOME_LOCK: Mutex<()> = Mutex::new(());

/// Temporary config home, exported through the env var until dropped.
pub struct TempConfigHome {
    dir: TempDir,
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl TempConfigHome {
    pub fn new() -> Self {
        let lock = CONFIG_HOME_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let previous = std::env::var_os(CONFIG_HOME_ENV);
        write_env(Some(dir.path().as_os_str()));
        Self {
            dir,
            previous,
            _lock: lock,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The `.churnpal` folder the library resolves while this guard lives.
    pub fn app_root(&self) -> PathBuf {
        AppDirs::under(self.path()).root().to_path_buf()
    }
}

impl Drop for TempConfigHome {
    fn drop(&mut self) {
        write_env(self.previous.take().as_deref());
    }
}

fn write_env(value: Option<&std::ffi::OsStr>) {
    // SAFETY: every writer holds CONFIG_HOME_LOCK.
    unsafe {
        match value {
            Some(value) => std::env::set_var(CONFIG_HOME_ENV, value),
            None => std::env::remove_var(CONFIG_HOME_ENV),
        }
    }
}
