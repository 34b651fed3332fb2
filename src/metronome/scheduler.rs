// Metronome scheduler - Idle/Running session owner
//
// At most one ticker is ever live: the session holds the single owned
// handle, and any change to the (active, bpm) pair cancels it before a new
// one is armed. Tempo changes therefore restart the periodic cycle cleanly
// instead of drifting from a stale interval.

use std::time::Duration;

use ringbuf::traits::Consumer;

use crate::messaging::channels::{TickConsumer, create_tick_channel};
use crate::metronome::ticker::Ticker;
use crate::tempo::math::tick_interval;

/// Plenty for a frame loop that drains every frame; ticks beyond this are
/// dropped by the producer rather than blocking the beat.
const TICK_CHANNEL_CAPACITY: usize = 64;

struct Session {
    bpm: i32,
    ticker: Ticker,
    tick_rx: TickConsumer,
}

/// Drives the tick signal for the selected performance.
///
/// The caller re-states the desired configuration every frame via [`sync`];
/// the scheduler compares it against the armed session and tears
/// down/re-arms only on change, so calling it repeatedly is free.
///
/// [`sync`]: MetronomeScheduler::sync
#[derive(Default)]
pub struct MetronomeScheduler {
    session: Option<Session>,
}

impl MetronomeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the running session with the desired state.
    ///
    /// Entering Running emits an immediate first tick (via the ticker).
    /// A non-positive `bpm` is routed through the tempo fallback, so it arms
    /// a safe interval rather than a zero-delay timer.
    pub fn sync(&mut self, active: bool, bpm: i32) {
        let stale = match &self.session {
            Some(session) => !active || session.bpm != bpm,
            None => false,
        };

        if stale {
            // Cancel before arming anything new; the old thread is joined
            // here, so two tickers can never overlap.
            if let Some(mut session) = self.session.take() {
                session.ticker.cancel();
            }
        }

        if active && self.session.is_none() {
            let interval = tick_interval(bpm);
            tracing::debug!(bpm, ?interval, "arming metronome");
            let (tick_tx, tick_rx) = create_tick_channel(TICK_CHANNEL_CAPACITY);
            let ticker = Ticker::spawn(interval, tick_tx);
            self.session = Some(Session {
                bpm,
                ticker,
                tick_rx,
            });
        }
    }

    /// Pop all pending ticks, returning how many fired since the last drain.
    pub fn drain_ticks(&mut self) -> usize {
        let Some(session) = &mut self.session else {
            return 0;
        };
        let mut count = 0;
        while session.tick_rx.try_pop().is_some() {
            count += 1;
        }
        count
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// BPM the current session is armed at, if Running.
    pub fn armed_bpm(&self) -> Option<i32> {
        self.session.as_ref().map(|s| s.bpm)
    }

    /// Interval the current session is armed at, if Running.
    pub fn armed_interval(&self) -> Option<Duration> {
        self.session.as_ref().map(|s| tick_interval(s.bpm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // A 1 BPM session only ever fires its immediate tick inside a test's
    // lifetime, which makes re-arm behavior observable without flakiness.
    const SLOW: i32 = 1;

    fn settle() {
        thread::sleep(Duration::from_millis(100));
    }

    #[test]
    fn test_idle_until_synced_active() {
        let mut scheduler = MetronomeScheduler::new();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.drain_ticks(), 0);

        scheduler.sync(false, 120);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_entering_running_fires_immediate_tick() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, SLOW);
        settle();
        assert!(scheduler.is_running());
        assert_eq!(scheduler.drain_ticks(), 1);
    }

    #[test]
    fn test_repeated_sync_does_not_rearm() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, SLOW);
        settle();
        scheduler.drain_ticks();

        scheduler.sync(true, SLOW);
        settle();
        // No fresh immediate tick: the session was left alone.
        assert_eq!(scheduler.drain_ticks(), 0);
    }

    #[test]
    fn test_tempo_change_restarts_session() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, SLOW);
        settle();
        scheduler.drain_ticks();

        scheduler.sync(true, SLOW + 1);
        settle();
        assert_eq!(scheduler.armed_bpm(), Some(SLOW + 1));
        // Fresh session announces itself with a new immediate tick.
        assert_eq!(scheduler.drain_ticks(), 1);
    }

    #[test]
    fn test_stop_tears_down() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, SLOW);
        settle();
        scheduler.sync(false, SLOW);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.drain_ticks(), 0);
    }

    #[test]
    fn test_non_positive_bpm_arms_fallback_interval() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, 0);
        assert_eq!(scheduler.armed_interval(), Some(Duration::from_millis(42)));
        scheduler.sync(true, -3);
        assert_eq!(scheduler.armed_interval(), Some(Duration::from_millis(42)));
    }

    #[test]
    fn test_armed_interval_matches_tempo() {
        let mut scheduler = MetronomeScheduler::new();
        scheduler.sync(true, 120);
        assert_eq!(scheduler.armed_interval(), Some(Duration::from_millis(500)));
    }
}
