use std::sync::atomic::{AtomicBool, AtomicI64};

use lingo_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: RwLock<Config>,
    /// Health signal maintained by the connection monitor. User
    /// feedback only; never a gate on correctness.
    pub connected: AtomicBool,
    /// Input length cap from backend settings; -1 means unlimited.
    pub char_limit: AtomicI64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            connected: AtomicBool::new(false),
            char_limit: AtomicI64::new(-1),
        }
    }
}
