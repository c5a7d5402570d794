//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from any thread (request handlers,
//! actors) without threading the config through every call.

use crate::config::PenConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<PenConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(PenConfig::default()));

#[inline]
pub fn cfg() -> Arc<PenConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: PenConfig) -> Arc<PenConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
