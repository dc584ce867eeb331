//! Location, timestamps and plain-text cleanup for idepot's per-command log.
use std::path::PathBuf;

/// Timestamp in the run header of a log file.
pub(super) const HEADER_STAMP: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp prefixed to each logged line.
pub(super) const LINE_STAMP: &str = "%H:%M:%S";

/// `<cache>/idepot/<command>.log`, with `<cache>` taken from `$XDG_CACHE_HOME`
/// or `$HOME/.cache`.
///
/// The directory is created on the way; `None` means it could not be, and the
/// run goes without a log file.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME").map_or_else(
        || {
            std::env::var_os("HOME")
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = cache.join("idepot");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_stamp(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Drop the terminal escape sequences the console formatter adds, so the log
/// file holds the same text without colour.
///
/// A CSI sequence (`ESC [`) runs up to its final byte in `@`..=`~`; any other
/// escape is two characters long.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((plain, escaped)) = rest.split_once('\x1b') {
        out.push_str(plain);
        let mut chars = escaped.chars();
        rest = match chars.next() {
            Some('[') => {
                let seq = chars.as_str();
                seq.find(|c: char| ('@'..='~').contains(&c))
                    .and_then(|end| seq.get(end + 1..))
                    .unwrap_or("")
            }
            Some(_) => chars.as_str(),
            None => "",
        };
    }
    out.push_str(rest);
    out
}
