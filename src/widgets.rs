use crate::storage::{Storage, StorageError, keys};
use chrono::{DateTime, Local};
use std::thread;
use std::time::Duration;

/// Placeholder shown when the visit counter cannot touch storage.
pub const COUNTER_PLACEHOLDER: &str = "—";

const GEO_UNAVAILABLE: &str = "Unavailable";
const GEO_DENIED: &str = "Permission denied";

/// Clock text: localized hour:minute:second.
pub fn clock_text(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Re-render the clock once per second, forever. There is deliberately no
/// cancellation hook; callers exit by dropping the whole process.
pub fn run_clock<F: FnMut(&str)>(mut sink: F) -> ! {
    loop {
        sink(&clock_text(Local::now()));
        thread::sleep(Duration::from_secs(1));
    }
}

/// One-shot position request parameters.
#[derive(Debug, Clone, Copy)]
pub struct GeoOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub max_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(5),
            max_age: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    PermissionDenied,
    Timeout,
    PositionUnavailable,
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::PermissionDenied => f.write_str("permission denied"),
            GeoError::Timeout => f.write_str("position request timed out"),
            GeoError::PositionUnavailable => f.write_str("position unavailable"),
        }
    }
}

impl std::error::Error for GeoError {}

/// Best-effort position capability. Hosts without one pass `None` to
/// [`geolocation_display`].
pub trait GeoProvider: Send + Sync {
    fn current_position(&self, options: &GeoOptions) -> Result<Coordinates, GeoError>;
}

/// Widget text: rounded coordinates on success; every failure cause
/// collapses to the same denial string.
pub fn geolocation_display(provider: Option<&dyn GeoProvider>, options: &GeoOptions) -> String {
    let Some(provider) = provider else {
        return GEO_UNAVAILABLE.to_string();
    };
    match provider.current_position(options) {
        Ok(position) => format!("{:.2}, {:.2}", position.latitude, position.longitude),
        Err(_) => GEO_DENIED.to_string(),
    }
}

/// Bump the simulated visit counter and return its display text. The only
/// place a storage failure is caught: it renders as the placeholder dash.
pub fn bump_visit_counter(storage: &dyn Storage) -> String {
    match try_bump(storage) {
        Ok(count) => format_count(count),
        Err(_) => COUNTER_PLACEHOLDER.to_string(),
    }
}

fn try_bump(storage: &dyn Storage) -> Result<u64, StorageError> {
    let next = storage
        .get(keys::VISITOR_COUNT)?
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .map(|count| count.saturating_add(1))
        .unwrap_or(1);
    storage.set(keys::VISITOR_COUNT, &next.to_string())?;
    Ok(next)
}

/// Thousands-separated rendering of the counter.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
