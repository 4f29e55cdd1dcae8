// Author: Dustin Pilgrim
// License: MIT

mod engine;
pub mod info;
mod list;
mod snapshot;

use crate::core::config::Config;

/// Applies timer events to a session according to the configured policy.
///
/// The manager owns no session: the daemon owns the `TimerSession` and lends
/// it for each event, so tests can drive any session directly.
#[derive(Debug, Clone)]
pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: Config) {
        self.cfg = cfg;
    }
}
