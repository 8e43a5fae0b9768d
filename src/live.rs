//! Headline counters for the "live" block on the home page.
//!
//! Nothing here is measured. A periodic job nudges the numbers by a small
//! random amount so the page feels alive.

use rand::Rng;

use crate::models::LiveStats;

const UPTIME_FLOOR: f64 = 95.0;
const UPTIME_CEILING: f64 = 100.0;

impl LiveStats {
    pub fn initial(total_hubs: usize) -> Self {
        Self {
            active_users: 12_847,
            total_hubs,
            uptime: 98.7,
            data_transferred_tb: 2.4,
        }
    }

    /// Applies one step of jitter.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let delta: i64 = rng.gen_range(-5..5);
        self.active_users = self.active_users.saturating_add_signed(delta);
        self.uptime =
            (self.uptime + rng.gen_range(-0.05_f64..0.05)).clamp(UPTIME_FLOOR, UPTIME_CEILING);
        self.data_transferred_tb += rng.gen_range(0.0_f64..0.01);
    }
}

impl Default for LiveStats {
    fn default() -> Self {
        Self::initial(127)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tick_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut stats = LiveStats::initial(3);

        for _ in 0..10_000 {
            let before = stats.clone();
            stats.tick(&mut rng);

            let diff = stats.active_users as i64 - before.active_users as i64;
            assert!((-5..5).contains(&diff));
            assert!(stats.uptime >= UPTIME_FLOOR && stats.uptime <= UPTIME_CEILING);
            assert!(stats.data_transferred_tb >= before.data_transferred_tb);
            assert_eq!(stats.total_hubs, 3);
        }
    }

    #[test]
    fn test_active_users_floor_at_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut floored = 0;

        for _ in 0..1_000 {
            let mut stats = LiveStats {
                active_users: 0,
                ..LiveStats::default()
            };
            stats.tick(&mut rng);

            // From zero the largest step up is +4; a wrap would be near u64::MAX
            assert!(stats.active_users <= 4, "got {}", stats.active_users);
            if stats.active_users == 0 {
                floored += 1;
            }
        }
        // Roughly half the steps are negative and must stop at zero
        assert!(floored > 100, "only {} ticks held at zero", floored);
    }
}
