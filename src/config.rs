use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Runtime settings, read from the environment (and `.env` when present).

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Store files next to the executable, falling back to the working directory.
fn default_dir() -> PathBuf {
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    PathBuf::from(".")
}

pub fn data_file() -> PathBuf {
    env::var_os("SKYDECK_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_dir().join("skydeck.json"))
}

pub fn log_file() -> PathBuf {
    env::var_os("SKYDECK_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_dir().join("skydeck.log"))
}

pub fn tick_rate_ms() -> u64 {
    env::var("SKYDECK_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(16) // ~60 FPS
}

/// Both variables must be set and non-empty for an administrator to exist.
pub fn admin_credentials() -> Option<(String, String)> {
    let user = env::var("SKYDECK_ADMIN_USER").ok().filter(|v| !v.is_empty())?;
    let password = env::var("SKYDECK_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
    Some((user, password))
}

pub fn json_logs() -> bool {
    matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"))
}
