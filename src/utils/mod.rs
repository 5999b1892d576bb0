//! Utility functions for the form layout pipeline.
//!
//! This module provides logging setup and, with the `visualization` feature, overlay
//! rendering of detected lines and fields.

#[cfg(feature = "visualization")]
pub mod visualization;

#[cfg(feature = "visualization")]
pub use visualization::{OverlayStyle, render_overlay};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging; the level is
/// controlled through `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
