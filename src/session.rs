//! Per-run score counters.

/// Counters for the current run, owned by [`crate::simulation::LanderSim`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSession {
    stars_collected: u32,
    landings: u32,
}

impl GameSession {
    #[inline]
    pub fn stars_collected(&self) -> u32 {
        self.stars_collected
    }

    #[inline]
    pub fn landings(&self) -> u32 {
        self.landings
    }

    /// Count one collected star and return the new total.
    pub fn record_star(&mut self) -> u32 {
        self.stars_collected += 1;
        self.stars_collected
    }

    pub fn record_landing(&mut self) -> u32 {
        self.landings += 1;
        self.landings
    }
}
