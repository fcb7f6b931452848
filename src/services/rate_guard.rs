use std::{
    collections::HashMap,
    net::IpAddr,
    sync::Mutex,
    time::{Duration, Instant},
};

pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(5);

pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests, please wait a few seconds before trying again.";

/// Per-address cooldown for the scrape path: one accepted request per window.
/// The map never evicts entries; acceptable for the lifetime of this tool.
pub struct RateGuard {
    window: Duration,
    last_accepted: Mutex<HashMap<IpAddr, Instant>>,
}

impl Default for RateGuard {
    fn default() -> Self {
        Self::with_window(COOLDOWN_WINDOW)
    }
}

impl RateGuard {
    pub fn with_window(window: Duration) -> Self {
        RateGuard {
            window,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    /// Check-then-record happens under a single lock hold, so two
    /// near-simultaneous requests from one address cannot both be accepted.
    /// A rejected request does not push the cooldown forward.
    pub fn try_acquire(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut last_accepted = self.last_accepted.lock().unwrap();

        match last_accepted.get(&addr) {
            Some(last) if now.duration_since(*last) < self.window => false,
            _ => {
                last_accepted.insert(addr, now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{net::IpAddr, thread, time::Duration};

    use super::RateGuard;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn first_request_from_an_address_is_accepted() {
        let guard = RateGuard::with_window(Duration::from_millis(50));
        assert!(guard.try_acquire(addr("10.0.0.1")));
    }

    #[test]
    fn request_inside_the_window_is_rejected() {
        let guard = RateGuard::with_window(Duration::from_millis(200));
        assert!(guard.try_acquire(addr("10.0.0.1")));
        assert!(!guard.try_acquire(addr("10.0.0.1")));
    }

    #[test]
    fn request_after_the_window_is_accepted_again() {
        let guard = RateGuard::with_window(Duration::from_millis(20));
        assert!(guard.try_acquire(addr("10.0.0.1")));
        thread::sleep(Duration::from_millis(30));
        assert!(guard.try_acquire(addr("10.0.0.1")));
    }

    #[test]
    fn addresses_are_tracked_independently() {
        let guard = RateGuard::with_window(Duration::from_millis(200));
        assert!(guard.try_acquire(addr("10.0.0.1")));
        assert!(guard.try_acquire(addr("10.0.0.2")));
        assert!(guard.try_acquire(addr("::1")));
    }

    #[test]
    fn rejection_does_not_reset_the_window() {
        let guard = RateGuard::with_window(Duration::from_millis(40));
        assert!(guard.try_acquire(addr("10.0.0.1")));
        thread::sleep(Duration::from_millis(25));
        assert!(!guard.try_acquire(addr("10.0.0.1")));
        thread::sleep(Duration::from_millis(25));
        assert!(guard.try_acquire(addr("10.0.0.1")));
    }
}
