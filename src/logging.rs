//! Internal logging setup for Pointregion.
//!
//! This module initializes the tracing subscriber at startup, gated behind the
//! `setup_tracing` feature. Logging behavior is controlled by the `DEBUG_POINTREGION`
//! environment variable: if it is unset or set to a falsy value ("0", "false", or empty),
//! no subscriber is installed and the `tracing` macros used throughout the crate remain no-ops.

#[cfg(feature = "setup_tracing")]
use ctor::ctor;
#[cfg(feature = "setup_tracing")]
use tracing::Level;

#[cfg(feature = "setup_tracing")]
#[ctor]
fn set_debug_level() {
    if std::env::var("DEBUG_POINTREGION").map_or(true, |v| v == "0" || v == "false" || v.is_empty())
    {
        // Leave logging disabled.
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
