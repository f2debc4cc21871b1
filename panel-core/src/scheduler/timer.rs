//! Tick divider

/// Scheduling tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tier {
    /// Bus and display steps
    Ms1,
    /// Command dispatch, buzzer and stepper
    Ms10,
    /// Heartbeat LED
    Ms100,
    /// Error view
    Ms1000,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Ms1, Tier::Ms10, Tier::Ms100, Tier::Ms1000];

    /// Period in base ticks
    pub const fn period(self) -> u16 {
        match self {
            Tier::Ms1 => 1,
            Tier::Ms10 => 10,
            Tier::Ms100 => 100,
            Tier::Ms1000 => 1000,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Divides the base tick into tier flags
///
/// A flag stays raised until taken; missed periods do not queue up.
#[derive(Debug, Clone, Default)]
pub struct TaskTimer {
    counters: [u16; 4],
    due: [bool; 4],
}

impl TaskTimer {
    pub const fn new() -> Self {
        Self {
            counters: [0; 4],
            due: [false; 4],
        }
    }

    /// Account for one base tick
    pub fn tick(&mut self) {
        for tier in Tier::ALL {
            let i = tier.index();
            self.counters[i] += 1;
            if self.counters[i] >= tier.period() {
                self.counters[i] = 0;
                self.due[i] = true;
            }
        }
    }

    /// Consume the flag for `tier`
    pub fn take(&mut self, tier: Tier) -> bool {
        core::mem::take(&mut self.due[tier.index()])
    }

    /// Check the flag without consuming it
    pub fn is_due(&self, tier: Tier) -> bool {
        self.due[tier.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tick_raises_ms1() {
        let mut timer = TaskTimer::new();
        assert!(!timer.take(Tier::Ms1));
        timer.tick();
        assert!(timer.take(Tier::Ms1));
        assert!(!timer.take(Tier::Ms1));
    }

    #[test]
    fn test_tier_periods() {
        let mut timer = TaskTimer::new();
        let mut fired = [0u32; 4];
        for _ in 0..2000 {
            timer.tick();
            for tier in Tier::ALL {
                if timer.take(tier) {
                    fired[tier as usize] += 1;
                }
            }
        }
        assert_eq!(fired, [2000, 200, 20, 2]);
    }

    #[test]
    fn test_flag_does_not_queue() {
        let mut timer = TaskTimer::new();
        for _ in 0..30 {
            timer.tick();
        }
        assert!(timer.is_due(Tier::Ms10));
        assert!(timer.take(Tier::Ms10));
        assert!(!timer.take(Tier::Ms10));
    }
}
