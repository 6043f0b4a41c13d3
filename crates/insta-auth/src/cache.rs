use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Read a previously cached authorization code.
///
/// Returns `None` when there is nothing usable to reuse. Open failures are
/// expected on a first run and only logged at debug level; anything that goes
/// wrong after the file was opened is logged as a warning.
pub fn read_code(path: &Path) -> Option<String> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("No cached code at '{}': {}", path.display(), e);
            return None;
        }
    };

    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(0) => {
            warn!("Code file '{}' is empty", path.display());
            None
        }
        Ok(_) => {
            let code = strip_line_ending(&line);
            if code.is_empty() {
                warn!("Code file '{}' starts with a blank line", path.display());
                return None;
            }
            Some(code.to_string())
        }
        Err(e) => {
            warn!("Failed to read code file '{}': {}", path.display(), e);
            None
        }
    }
}

/// Overwrite the code file with `code`, readable by the owner only.
pub fn save_code(path: &Path, code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::EmptyCode);
    }

    let write_err = |source| Error::CodeWrite {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(path, code).map_err(write_err)?;

    // Set secure permissions (owner read/write only) on Unix-like systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(write_err)?;
    }

    debug!("Cached code in '{}'", path.display());
    Ok(())
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
