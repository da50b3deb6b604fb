use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use url::Url;

pub const GENERATED_IMAGE_NAME: &str = "generated_code.png";

#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(test)]
pub fn test_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Local path behind a `file:` URI (percent-decoded) or an absolute path.
pub fn parse_file_uri_path(uri: &str) -> Option<PathBuf> {
    if uri.starts_with("file:") {
        return Url::parse(uri).ok()?.to_file_path().ok();
    }
    if uri.starts_with('/') {
        return Some(PathBuf::from(uri));
    }
    None
}

pub fn preferred_cache_dir() -> PathBuf {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(custom) = std::env::var("CODESCAN_CACHE_DIR") {
        candidates.push(PathBuf::from(custom));
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        candidates.push(PathBuf::from(tmpdir));
    }
    candidates.push(PathBuf::from("/data/user/0/aeska.codescan/cache"));
    candidates.push(PathBuf::from("/data/data/aeska.codescan/cache"));
    candidates.push(std::env::temp_dir());

    for dir in candidates {
        if let Ok(meta) = std::fs::metadata(&dir) {
            if meta.is_dir() {
                return dir;
            }
        }
    }
    std::env::temp_dir()
}

/// Overwrites the single transient export of the generated barcode.
pub fn write_generated_png(png: &[u8]) -> CoreResult<PathBuf> {
    write_generated_png_in(&preferred_cache_dir(), png)
}

pub fn write_generated_png_in(dir: &Path, png: &[u8]) -> CoreResult<PathBuf> {
    let path = dir.join(GENERATED_IMAGE_NAME);
    std::fs::write(&path, png)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uris_and_absolute_paths_resolve() {
        assert_eq!(
            parse_file_uri_path("file:///sdcard/a.png"),
            Some(PathBuf::from("/sdcard/a.png"))
        );
        assert_eq!(
            parse_file_uri_path("/sdcard/b.png"),
            Some(PathBuf::from("/sdcard/b.png"))
        );
        assert_eq!(parse_file_uri_path("content://media/external/1"), None);
    }

    #[test]
    fn file_uri_escapes_are_decoded() {
        assert_eq!(
            parse_file_uri_path("file:///sdcard/My%20Pics/a%23b.png"),
            Some(PathBuf::from("/sdcard/My Pics/a#b.png"))
        );
        assert_eq!(
            parse_file_uri_path("file://localhost/sdcard/c.png"),
            Some(PathBuf::from("/sdcard/c.png"))
        );
        assert_eq!(parse_file_uri_path("file://otherhost/sdcard/c.png"), None);
    }

    #[test]
    fn cache_dir_env_override_wins() {
        let _guard = test_env_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CODESCAN_CACHE_DIR", dir.path());
        assert_eq!(preferred_cache_dir(), dir.path());
        std::env::remove_var("CODESCAN_CACHE_DIR");
    }

    #[test]
    fn generated_png_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_generated_png_in(dir.path(), b"one").unwrap();
        let second = write_generated_png_in(dir.path(), b"two").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read(second).unwrap(), b"two");
    }
}
