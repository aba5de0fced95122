/// Per-question countdown, advanced one second per [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
}

/// How close the countdown is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Low,
    Critical,
}

impl Countdown {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    pub fn reset(&mut self, limit: u32) {
        *self = Self::new(limit);
    }

    /// Returns true once the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn urgency(&self) -> Urgency {
        match self.remaining {
            0..=5 => Urgency::Critical,
            6..=10 => Urgency::Low,
            _ => Urgency::Calm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_expiry() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_zero_limit_expires_on_first_tick() {
        assert!(Countdown::new(0).tick());
    }

    #[test]
    fn test_reset_and_urgency() {
        let mut countdown = Countdown::new(15);
        assert_eq!(countdown.urgency(), Urgency::Calm);
        for _ in 0..5 {
            countdown.tick();
        }
        assert_eq!(countdown.urgency(), Urgency::Low);
        countdown.reset(4);
        assert_eq!(countdown.limit(), 4);
        assert_eq!(countdown.urgency(), Urgency::Critical);
    }
}
