use std::time::Duration;

use rand::Rng;

use crate::config::DelayRange;

impl DelayRange {
    pub fn pick(&self) -> Duration {
        if self.max_us == 0 {
            return Duration::ZERO;
        }
        let us = rand::rng().random_range(self.min_us..=self.max_us);
        Duration::from_micros(us)
    }

    /// Sleeps a random duration inside the range.
    pub async fn sleep(&self) {
        let duration = self.pick();
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_inside_range() {
        let range = DelayRange::new(100, 200);
        for _ in 0..1000 {
            let us = range.pick().as_micros() as u64;
            assert!((100..=200).contains(&us));
        }
    }

    #[test]
    fn empty_range_does_not_sleep() {
        assert_eq!(DelayRange::NONE.pick(), Duration::ZERO);
        assert_eq!(DelayRange::new(7, 7).pick(), Duration::from_micros(7));
    }

    #[tokio::test]
    async fn sleep_without_delay_returns() {
        DelayRange::NONE.sleep().await;
    }
}
