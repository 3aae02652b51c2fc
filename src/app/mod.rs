// Session state management
//
// This module contains the SessionState struct that owns the message
// counters, the bounded arrival history used for rate estimation, and the
// running flag the event handler flips on a quit key. Configuration
// constants live in the config submodule.

pub mod config;
pub mod event;

use crate::net::NetError;
use config::{RATE_EXCELLENT_HZ, RATE_GOOD_HZ, RATE_HISTORY_LEN};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How a streaming session ended
#[derive(Debug)]
pub enum SessionEnd {
    /// The server closed the connection (zero-length read)
    ClosedByPeer,
    /// A socket error interrupted the stream
    SocketError(NetError),
    /// The operator asked to stop (Ctrl+C / q / Esc)
    Interrupted,
}

/// Qualitative link status derived from the instantaneous record rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkQuality {
    Excellent,
    Good,
    Slow,
}

impl LinkQuality {
    /// Classify a rate in records/second; thresholds are strict
    pub fn from_rate(rate: f64) -> Self {
        if rate > RATE_EXCELLENT_HZ {
            LinkQuality::Excellent
        } else if rate > RATE_GOOD_HZ {
            LinkQuality::Good
        } else {
            LinkQuality::Slow
        }
    }

    /// Status cell text for the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            LinkQuality::Excellent => "🟢 Excellent",
            LinkQuality::Good => "🟡 Good",
            LinkQuality::Slow => "🔴 Slow",
        }
    }
}

/// End-of-session figures printed below the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub total_messages: u64,
    pub average_rate: f64,
    pub elapsed: Duration,
}

/// State for one streaming session
///
/// There is exactly one of these per process invocation; it is passed by
/// mutable reference into the receive loop and the renderer, never stored
/// in a global.
pub struct SessionState {
    /// Cleared by the event handler to request a graceful stop
    pub running: bool,

    /// Count of valid records accepted this session
    pub message_count: u64,

    /// When the session loop started
    started_at: Instant,

    /// Arrival instants of the most recent records, oldest first
    rate_history: VecDeque<Instant>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            running: true,
            message_count: 0,
            started_at: Instant::now(),
            rate_history: VecDeque::with_capacity(RATE_HISTORY_LEN),
        }
    }

    /// Account for one accepted record arriving at `at`
    pub fn record_arrival(&mut self, at: Instant) {
        self.message_count += 1;
        if self.rate_history.len() == RATE_HISTORY_LEN {
            self.rate_history.pop_front();
        }
        self.rate_history.push_back(at);
    }

    /// Instantaneous record rate over the arrival history, in records/second
    ///
    /// Returns 0.0 with fewer than two samples or a zero time span.
    pub fn current_rate(&self) -> f64 {
        let (first, last) = match (self.rate_history.front(), self.rate_history.back()) {
            (Some(f), Some(l)) if self.rate_history.len() >= 2 => (*f, *l),
            _ => return 0.0,
        };
        let span = last.duration_since(first).as_secs_f64();
        if span > 0.0 {
            (self.rate_history.len() - 1) as f64 / span
        } else {
            0.0
        }
    }

    pub fn link_quality(&self) -> LinkQuality {
        LinkQuality::from_rate(self.current_rate())
    }

    /// Session totals as of `now`; the average clamps the elapsed time to at
    /// least one second so a burst in the first instant reads sanely
    pub fn summary_at(&self, now: Instant) -> SessionSummary {
        let elapsed = now.duration_since(self.started_at);
        SessionSummary {
            total_messages: self.message_count,
            average_rate: self.message_count as f64 / elapsed.as_secs_f64().max(1.0),
            elapsed,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary_at(Instant::now())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rate_is_zero_with_fewer_than_two_samples() {
        let mut state = SessionState::new();
        assert_eq!(state.current_rate(), 0.0);

        state.record_arrival(Instant::now());
        assert_eq!(state.current_rate(), 0.0);
    }

    #[test]
    fn rate_over_four_samples_spanning_three_seconds_is_one() {
        let mut state = SessionState::new();
        let t0 = Instant::now();
        for s in 0..4u64 {
            state.record_arrival(t0 + Duration::from_secs(s));
        }
        assert_eq!(state.current_rate(), 1.0);
    }

    #[test]
    fn rate_is_zero_when_all_samples_coincide() {
        let mut state = SessionState::new();
        let t0 = Instant::now();
        state.record_arrival(t0);
        state.record_arrival(t0);
        assert_eq!(state.current_rate(), 0.0);
    }

    #[test]
    fn history_is_bounded_to_fifty_entries() {
        let mut state = SessionState::new();
        let t0 = Instant::now();
        for s in 0..200u64 {
            state.record_arrival(t0 + Duration::from_secs(s));
        }
        assert_eq!(state.message_count, 200);
        // 50 entries, one second apart: (50 - 1) / 49 s
        assert_eq!(state.current_rate(), 1.0);
        assert_eq!(state.rate_history.len(), RATE_HISTORY_LEN);
    }

    #[test]
    fn quality_thresholds_are_strict() {
        assert_eq!(LinkQuality::from_rate(30.1), LinkQuality::Excellent);
        assert_eq!(LinkQuality::from_rate(30.0), LinkQuality::Good);
        assert_eq!(LinkQuality::from_rate(10.1), LinkQuality::Good);
        assert_eq!(LinkQuality::from_rate(10.0), LinkQuality::Slow);
        assert_eq!(LinkQuality::from_rate(0.0), LinkQuality::Slow);
    }

    #[test]
    fn summary_clamps_elapsed_below_one_second() {
        let mut state = SessionState::new();
        let t0 = Instant::now();
        for _ in 0..10 {
            state.record_arrival(t0);
        }
        let summary = state.summary_at(t0 + Duration::from_millis(100));
        assert_eq!(summary.total_messages, 10);
        // 10 messages over a clamped 1 s window
        assert_eq!(summary.average_rate, 10.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For uniformly spaced arrivals the estimated rate matches the
        /// spacing reciprocal regardless of sample count.
        #[test]
        fn prop_uniform_spacing_recovers_rate(
            interval_ms in 1u64..2000u64,
            samples in 2usize..120usize,
        ) {
            let mut state = SessionState::new();
            let t0 = Instant::now();
            for i in 0..samples {
                state.record_arrival(t0 + Duration::from_millis(interval_ms * i as u64));
            }
            let expected = 1000.0 / interval_ms as f64;
            let got = state.current_rate();
            prop_assert!((got - expected).abs() / expected < 1e-9);
        }
    }
}
