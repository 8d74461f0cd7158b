//! Logging facilities for gridkit.
//!
//! gridkit uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("gridkit=debug,gridkit_core=info")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "gridkit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gridkit_core::signal";
    /// Deferred request queue target.
    pub const DEFERRED: &str = "gridkit_core::deferred";
    /// Data model (columns, items, subitems) target.
    pub const MODEL: &str = "gridkit::model";
    /// Region classifier target.
    pub const REGION: &str = "gridkit::region";
    /// Embedded editor host target.
    pub const EDITOR: &str = "gridkit::editor";
    /// Theme applier target.
    pub const THEME: &str = "gridkit::theme";
    /// Grid list view target.
    pub const VIEW: &str = "gridkit::view";
}

/// Install a compact `tracing` subscriber for tests and demos.
///
/// Honors `RUST_LOG`. Safe to call more than once; later calls are ignored.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
