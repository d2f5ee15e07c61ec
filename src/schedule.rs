use std::time::Duration;

use instant::Instant;

/// Minimum time between engine ticks (~10 per second).
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Throttles a fast frame clock down to engine ticks.
///
/// Sampled once per redraw. The first sample only primes the gate; after
/// that a tick fires whenever more than `interval` has passed since the last
/// one. Missed intervals are dropped, never replayed.
pub struct TickGate {
    interval: Duration,
    last_tick: Option<Instant>,
    running: bool,
    ticks: u64,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            running: true,
            ticks: 0,
        }
    }

    /// Feed one clock sample. Returns true if the engine should tick now.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };

        if now.saturating_duration_since(last) > self.interval {
            self.last_tick = Some(now);
            self.ticks += 1;
            return true;
        }
        false
    }

    /// Stop for good. Later polls never fire.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("tick gate stopped after {} ticks", self.ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_sample_primes_only() {
        let mut gate = TickGate::default();
        assert!(!gate.poll(Instant::now()));
        assert_eq!(gate.ticks(), 0);
    }

    #[test]
    fn fires_strictly_after_interval() {
        let start = Instant::now();
        let mut gate = TickGate::default();
        gate.poll(start);

        assert!(!gate.poll(start + ms(16)));
        assert!(!gate.poll(start + ms(100)));
        assert!(gate.poll(start + ms(101)));
        assert!(!gate.poll(start + ms(150)));
        assert!(gate.poll(start + ms(202)));
        assert_eq!(gate.ticks(), 2);
    }

    #[test]
    fn long_stall_yields_a_single_tick() {
        let start = Instant::now();
        let mut gate = TickGate::default();
        gate.poll(start);

        assert!(gate.poll(start + ms(1000)));
        assert!(!gate.poll(start + ms(1016)));
        assert_eq!(gate.ticks(), 1);
    }

    #[test]
    fn sixty_hz_clock_ticks_about_ten_times_a_second() {
        let start = Instant::now();
        let mut gate = TickGate::default();
        let frame = Duration::from_micros(16_667);

        let fired = (0..=60u32)
            .filter(|&i| gate.poll(start + frame * i))
            .count();

        assert!((8..=10).contains(&fired), "fired {fired}");
    }

    #[test]
    fn stopped_gate_never_fires() {
        let start = Instant::now();
        let mut gate = TickGate::default();
        gate.poll(start);
        gate.stop();

        assert!(!gate.is_running());
        assert!(!gate.poll(start + ms(500)));
        assert_eq!(gate.ticks(), 0);
    }
}
