use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::auth::AuthSession;
use crate::error::{Result, WellnessError};

/// Keeps the logged-in session on disk between CLI invocations.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<AuthSession>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WellnessError::Storage(e.to_string())),
        };

        let session = serde_json::from_str(&raw)
            .map_err(|e| WellnessError::Storage(format!("Corrupt credentials file: {}", e)))?;
        debug!("Loaded credentials from {}", self.path.display());
        Ok(Some(session))
    }

    pub fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| WellnessError::Storage(e.to_string()))?;
            }
        }

        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| WellnessError::Storage(e.to_string()))?;
        write_private(&self.path, raw.as_bytes())
            .map_err(|e| WellnessError::Storage(e.to_string()))?;
        info!("Saved credentials for {}", session.viewer());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared credentials at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WellnessError::Storage(e.to_string())),
        }
    }
}

/// Writes `data` readable by the owner only. Opening an existing file keeps
/// its mode, so the mode is set again after open.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.truncate(true).write(true).create(true);
    #[cfg(unix)]
    {
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}
