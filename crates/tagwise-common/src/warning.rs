//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the command-line host to report elements the tree builder had to
//! close while recovering from malformed markup. The library crates never
//! write here themselves.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are written to stderr at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about a recovered problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Parser", "auto-closed <span> while closing </div>");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[tagwise {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `message` from `component` has been printed since the
/// last [`clear_warnings`].
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap()
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Turn warning output on or off for the whole process.
///
/// Hosts that report findings themselves (e.g. `--quiet`) switch this off.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns true if warnings are currently written to stderr.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Clear all recorded warnings (call when loading a new document)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, since the channel is process-wide state.
    #[test]
    fn test_warning_channel() {
        warn_once("Test", "first message");
        warn_once("Test", "first message");
        assert!(has_warned("Test", "first message"));
        assert!(!has_warned("Other", "first message"));

        clear_warnings();
        assert!(!has_warned("Test", "first message"));

        set_enabled(false);
        assert!(!is_enabled());
        warn_once("Test", "silenced");
        assert!(!has_warned("Test", "silenced"));

        set_enabled(true);
        assert!(is_enabled());
    }
}
