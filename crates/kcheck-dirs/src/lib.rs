use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use etcetera::BaseStrategy;

const APP_DIR: &str = "kcheck";
const CONFIG_FILE: &str = "kcheck.yaml";

/// Returns the path to the user configuration directory.
///
/// Uses `XDG_CONFIG_HOME` or `$HOME/.config`, e.g. `/home/alice/.config`.
/// Returns `None` if the home directory cannot be resolved.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let base_strategy = etcetera::choose_base_strategy().ok()?;
    Utf8PathBuf::try_from(base_strategy.config_dir()).ok()
}

/// `$XDG_CONFIG_HOME/kcheck/kcheck.yaml`, whether or not it exists.
pub fn user_config_file() -> Option<Utf8PathBuf> {
    user_config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

fn locate_system_config_xdg(value: Option<&str>) -> Option<Utf8PathBuf> {
    let default = "/etc/xdg";
    let config_dirs = value.filter(|s| !s.is_empty()).unwrap_or(default);

    for dir in config_dirs.split(':').take_while(|s| !s.is_empty()) {
        let config_path = Utf8Path::new(dir).join(APP_DIR).join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
    }
    None
}

/// Returns the path to the system configuration file.
///
/// Searches `XDG_CONFIG_DIRS` (falling back to `/etc/xdg` if unset or empty)
/// for `kcheck/kcheck.yaml`, then tries `/etc/kcheck/kcheck.yaml`.
pub fn system_config_file() -> Option<Utf8PathBuf> {
    if let Some(path) = locate_system_config_xdg(env::var("XDG_CONFIG_DIRS").ok().as_deref()) {
        return Some(path);
    }

    let candidate = Utf8Path::new("/etc").join(APP_DIR).join(CONFIG_FILE);
    match candidate.try_exists() {
        Ok(true) => Some(candidate),
        Ok(false) => None,
        Err(err) => {
            tracing::warn!("Failed to query system configuration file: {err}");
            None
        }
    }
}
