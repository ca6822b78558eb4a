//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Directory holding `vault.json` and the trace file.
///
/// `/host` is the cwd of the last focused terminal (or where Zellij was
/// started), which is normally the user's home, so this usually resolves to
/// `~/.local/share/tauthy`.
///
/// ```
/// use vaultbar::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/tauthy"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share").join("tauthy")
}

/// Maps a `~`-prefixed path from user configuration into the sandbox.
///
/// ```
/// use vaultbar::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/locales/fr.toml"), "/host/locales/fr.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/fr.toml"), "/etc/fr.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
