use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::error::BcdError;
use crate::shell::snippet::{END_MARKER, START_MARKER, shell_function};

/// Adds the shell function to `file`, replacing a previously installed one.
///
/// A timestamped copy of the file is kept next to it until the new contents
/// are written; if writing fails the copy stays behind.
pub fn install<P: AsRef<Path>>(file: P, alias: &str) -> Result<(), BcdError> {
    let file = file.as_ref();
    let snippet = shell_function(alias)?;
    if !file.is_file() {
        return Err(BcdError::MissingShellFile(file.to_path_buf()));
    }

    let backup = backup_path(file);
    fs::copy(file, &backup)?;
    debug!("backed up {} to {}", file.display(), backup.display());

    let contents = fs::read_to_string(file)?;
    fs::write(file, splice(&contents, &snippet))?;
    fs::remove_file(&backup)?;

    info!("installed {alias} into {}", file.display());
    Ok(())
}

/// `contents` without any installed block, with `snippet` appended.
pub fn splice(contents: &str, snippet: &str) -> String {
    let mut kept = Vec::new();
    let mut started = false;
    let mut ended = false;

    for line in contents.trim().lines() {
        let marker = line.trim();
        if !started && marker == START_MARKER {
            started = true;
            continue;
        }
        if started && !ended && marker == END_MARKER {
            ended = true;
            continue;
        }
        if !started || ended {
            kept.push(line);
        }
    }

    kept.extend(snippet.lines());
    format!("{}\n", kept.join("\n").trim())
}

fn backup_path(file: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file.with_file_name(format!("{name}.{millis}.bcd-install-backup"))
}
