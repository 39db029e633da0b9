//! Process-wide configuration.
//!
//! A single read-mostly [`Config`] holds the default message selector, an
//! optional global error customizer and the default input-echo policy. It is
//! swapped atomically; readers take a cheap `Arc` snapshot.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::error::messages::default_message;
use crate::params::ErrorMap;

/// Global parse configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Consulted after the per-parse customizer.
    pub error_map: Option<ErrorMap>,
    /// The default message selector, consulted last.
    pub locale: ErrorMap,
    /// Whether new parse contexts echo offending inputs in issues.
    pub report_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_map: None,
            locale: ErrorMap::new(|issue| Some(default_message(issue))),
            report_input: true,
        }
    }
}

static CONFIG: LazyLock<RwLock<Arc<Config>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Config::default())));

/// Returns a snapshot of the current configuration.
pub fn config() -> Arc<Config> {
    Arc::clone(&CONFIG.read())
}

/// Replaces the configuration with an updated copy.
///
/// # Example
///
/// ```rust
/// use inquest::{configure, reset_config, ErrorMap, Schema, TypedSchema};
///
/// configure(|c| c.error_map = Some(ErrorMap::from("invalid")));
/// let err = Schema::string().parse(1).unwrap_err();
/// assert_eq!(err.first().message, "invalid");
/// reset_config();
/// ```
pub fn configure<F>(update: F)
where
    F: FnOnce(&mut Config),
{
    let mut guard = CONFIG.write();
    let mut next = Config::clone(&guard);
    update(&mut next);
    tracing::debug!(
        report_input = next.report_input,
        custom_error_map = next.error_map.is_some(),
        "configuration replaced"
    );
    *guard = Arc::new(next);
}

/// Restores the default configuration.
pub fn reset_config() {
    tracing::debug!("configuration reset");
    *CONFIG.write() = Arc::new(Config::default());
}
