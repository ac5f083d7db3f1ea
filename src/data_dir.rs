use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable that overrides the default document directory.
pub const DATA_DIR_ENV: &str = "TUPA_DATA_DIR";

/// The directory holding the procedure documents.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Resolve the document directory from, in order of priority:
    /// 1. An explicit path (from --data-dir)
    /// 2. The TUPA_DATA_DIR environment variable
    /// 3. `tupa_data` under the XDG data directory (~/.local/share/tupa/)
    ///
    /// The directory is never created here. A missing directory yields an
    /// empty catalog at load time.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let root = if let Some(path) = explicit {
            path.to_path_buf()
        } else if let Ok(val) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(val)
        } else {
            xdg::BaseDirectories::with_prefix("tupa")
                .get_data_home()
                .ok_or_else(|| {
                    Error::Config(
                        "could not determine XDG data home directory".into(),
                    )
                })?
                .join("tupa_data")
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }
}
