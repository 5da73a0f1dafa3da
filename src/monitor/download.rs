use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

const FALLBACK_FILENAME: &str = "screenshot";

/// Derive the file name a screenshot is saved under: the last segment of its
/// path on the server, reduced to a single plain path component.
pub fn suggested_filename(screenshot_path: &str) -> String {
    let last = screenshot_path.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| if c == ':' || c.is_control() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    let mut components = Path::new(cleaned).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => cleaned.to_string(),
        _ => FALLBACK_FILENAME.to_string(),
    }
}

/// Write `bytes` into `dir` under `filename`, never overwriting an existing
/// file. The bytes go to a temporary file first; it is removed on every path
/// that does not end in a successful persist.
pub fn save_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let mut attempt = 0;
    loop {
        let target = numbered_target(dir, filename, attempt);
        match tmp.persist_noclobber(&target) {
            Ok(_) => {
                debug!(path = %target.display(), size = bytes.len(), "Saved artifact");
                return Ok(target);
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                tmp = e.file;
                attempt += 1;
            }
            Err(e) => return Err(e.error),
        }
    }
}

/// `name.ext`, then `name (1).ext`, `name (2).ext`, ...
fn numbered_target(dir: &Path, filename: &str, attempt: u32) -> PathBuf {
    if attempt == 0 {
        return dir.join(filename);
    }
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let name = match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, attempt, ext.to_string_lossy()),
        None => format!("{} ({})", stem, attempt),
    };
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_segment() {
        assert_eq!(suggested_filename("shots/img42.png"), "img42.png");
        assert_eq!(suggested_filename("img42.png"), "img42.png");
        assert_eq!(suggested_filename("/data/screenshots/a.png"), "a.png");
        assert_eq!(suggested_filename("shots/"), "screenshot");
        assert_eq!(suggested_filename("shots/.."), "screenshot");
    }

    #[test]
    fn filename_never_escapes_download_dir() {
        assert_eq!(suggested_filename("shots/..\\..\\evil.png"), "evil.png");
        assert_eq!(suggested_filename("C:\\Users\\x\\evil.png"), "evil.png");
        assert_eq!(suggested_filename("shots/a.png:stream"), "a.png_stream");
        assert_eq!(suggested_filename("shots/bad\u{0}name.png"), "bad_name.png");
        assert_eq!(suggested_filename("shots\\..\\.."), "screenshot");
        assert_eq!(suggested_filename("shots/C:"), "C_");
    }

    #[test]
    fn save_artifact_removes_temp_file_when_persist_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = save_artifact(dir.path(), "bad\0name.png", b"abc");
        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_artifact_cleans_up_on_success() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = save_artifact(dir.path(), "x.bin", b"abc").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn numbered_target_keeps_extension() {
        let dir = Path::new("/tmp/d");
        assert_eq!(numbered_target(dir, "a.png", 0), dir.join("a.png"));
        assert_eq!(numbered_target(dir, "a.png", 2), dir.join("a (2).png"));
        assert_eq!(numbered_target(dir, "README", 1), dir.join("README (1)"));
    }
}
