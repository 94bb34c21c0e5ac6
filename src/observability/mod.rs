//! Diagnostics of the logger itself.
//!
//! The library only emits `tracing` events (suppressed events, encoder
//! fallbacks, configuration warnings). Installing a subscriber is left to the
//! binary, which does it through `logging::init_tracing`.

pub mod logging;
