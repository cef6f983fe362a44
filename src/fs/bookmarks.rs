use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::core::Candidate;

const FILE_SCHEME: &str = "file://";

/// The GTK bookmark list under the user's home directory.
pub fn default_bookmarks_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/gtk-3.0/bookmarks"))
}

/// Loads bookmarks from `path`, in file order.
///
/// Never fails: an unreadable file gives an empty list, a read error part way
/// through gives whatever was read up to that point.
pub fn load<P: AsRef<Path>>(path: P) -> Vec<Candidate> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => {
            let candidates = read(BufReader::new(file));
            debug!("loaded {} bookmarks from {}", candidates.len(), path.display());
            candidates
        }
        Err(err) => {
            warn!("could not open bookmarks file {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

pub fn read<R: BufRead>(reader: R) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for line in reader.split(b'\n') {
        match line {
            Ok(bytes) => {
                let line = String::from_utf8_lossy(&bytes);
                if let Some(candidate) = parse_line(&line) {
                    candidates.push(candidate);
                }
            }
            Err(err) => {
                warn!("stopped reading bookmarks: {err}");
                break;
            }
        }
    }
    candidates
}

/// Parses `<uri> [name]`. Blank lines give `None`.
pub fn parse_line(line: &str) -> Option<Candidate> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    let (uri, label) = match line.split_once(' ') {
        Some((uri, label)) => (uri, Some(label)),
        None => (line, None),
    };

    let decoded = unescape(uri);
    let path = decoded
        .strip_prefix(FILE_SCHEME)
        .unwrap_or(decoded.as_str())
        .to_string();

    let name = match label {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => unescape(base_name(uri)),
    };

    Some(Candidate { name, path })
}

fn unescape(s: &str) -> String {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned(),
    }
}

fn base_name(uri: &str) -> &str {
    let trimmed = uri.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
