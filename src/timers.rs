//! Study timers.
//!
//! A `TimerBank` owns up to ten countdown timers with stable single-digit
//! ids. Running timers are modeled by their end instant so ticks never
//! accumulate drift; paused timers store the frozen remainder. All methods
//! take `now` explicitly so tests can drive the clock.

use std::time::{Duration, Instant};

pub const MAX_TIMERS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { ends_at: Instant },
    Paused { remaining: Duration },
}

#[derive(Debug, Clone)]
pub struct StudyTimer {
    pub id: u8,
    pub name: String,
    pub initial: Duration,
    phase: Phase,
}

impl StudyTimer {
    fn new(id: u8, name: String, initial: Duration) -> Self {
        StudyTimer {
            id,
            name,
            initial,
            phase: Phase::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// Time left on the countdown; the full duration while idle.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle => self.initial,
            Phase::Running { ends_at } => ends_at.saturating_duration_since(now),
            Phase::Paused { remaining } => remaining,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.phase = Phase::Running {
            ends_at: now + self.initial,
        };
    }

    /// Freeze a running timer or resume a paused one; idle is untouched.
    pub fn toggle_pause(&mut self, now: Instant) {
        self.phase = match self.phase {
            Phase::Running { ends_at } => Phase::Paused {
                remaining: ends_at.saturating_duration_since(now),
            },
            Phase::Paused { remaining } => Phase::Running {
                ends_at: now + remaining,
            },
            Phase::Idle => Phase::Idle,
        };
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

/// The owned collection of timers, ticked once per second from a
/// subscription.
#[derive(Debug, Default)]
pub struct TimerBank {
    timers: Vec<StudyTimer>,
}

impl TimerBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timers(&self) -> &[StudyTimer] {
        &self.timers
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut StudyTimer> {
        self.timers.iter_mut().find(|t| t.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.timers.len() >= MAX_TIMERS
    }

    /// Create a timer on the smallest free id. Zero durations and a full
    /// bank are rejected.
    pub fn create(&mut self, name: String, initial: Duration) -> Option<u8> {
        if initial.is_zero() || self.is_full() {
            return None;
        }
        let id = (0..MAX_TIMERS as u8).find(|id| self.timers.iter().all(|t| t.id != *id))?;
        self.timers.push(StudyTimer::new(id, name, initial));
        self.timers.sort_by_key(|t| t.id);
        Some(id)
    }

    pub fn remove(&mut self, id: u8) {
        self.timers.retain(|t| t.id != id);
    }

    /// Advance all timers to `now`; expired ones reset to idle and their
    /// ids are returned so the UI can announce them.
    pub fn tick(&mut self, now: Instant) -> Vec<u8> {
        let mut expired = Vec::new();
        for timer in &mut self.timers {
            if timer.is_running() && timer.remaining(now).is_zero() {
                timer.reset();
                expired.push(timer.id);
            }
        }
        expired
    }
}

/// The HH:MM:SS digit-entry form used when creating a timer.
///
/// Each digit wraps independently; tens-of-minutes and tens-of-seconds
/// wrap at 5 so the form can never express 61 minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerForm {
    pub name: String,
    digits: [u8; 6],
}

const DIGIT_MAX: [u8; 6] = [9, 9, 5, 9, 5, 9];

impl TimerForm {
    pub fn digits(&self) -> [u8; 6] {
        self.digits
    }

    pub fn increment(&mut self, index: usize) {
        if index < 6 {
            self.digits[index] = if self.digits[index] >= DIGIT_MAX[index] {
                0
            } else {
                self.digits[index] + 1
            };
        }
    }

    pub fn decrement(&mut self, index: usize) {
        if index < 6 {
            self.digits[index] = if self.digits[index] == 0 {
                DIGIT_MAX[index]
            } else {
                self.digits[index] - 1
            };
        }
    }

    pub fn duration(&self) -> Duration {
        let d = self.digits.map(u64::from);
        let hours = d[0] * 10 + d[1];
        let minutes = d[2] * 10 + d[3];
        let seconds = d[4] * 10 + d[5];
        Duration::from_secs(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| *d == 0)
    }

    pub fn clear(&mut self) {
        *self = TimerForm::default();
    }
}

/// Render a duration as `HH:MM:SS`, rounding up partial seconds so a
/// running timer never shows 00:00:00 before it expires.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn bank_allocates_smallest_free_id() {
        let mut bank = TimerBank::new();
        assert_eq!(bank.create("a".into(), secs(60)), Some(0));
        assert_eq!(bank.create("b".into(), secs(60)), Some(1));
        bank.remove(0);
        assert_eq!(bank.create("c".into(), secs(60)), Some(0));
    }

    #[test]
    fn bank_caps_at_ten_timers() {
        let mut bank = TimerBank::new();
        for i in 0..MAX_TIMERS {
            assert_eq!(bank.create(format!("t{i}"), secs(5)), Some(i as u8));
        }
        assert!(bank.is_full());
        assert_eq!(bank.create("overflow".into(), secs(5)), None);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut bank = TimerBank::new();
        assert_eq!(bank.create("zero".into(), Duration::ZERO), None);
        assert!(bank.timers().is_empty());
    }

    #[test]
    fn pause_freezes_the_remainder() {
        let now = Instant::now();
        let mut bank = TimerBank::new();
        let id = bank.create("t".into(), secs(100)).unwrap();
        let timer = bank.get_mut(id).unwrap();

        timer.start(now);
        let later = now + secs(30);
        timer.toggle_pause(later);
        assert!(timer.is_paused());
        assert_eq!(timer.remaining(later), secs(70));
        // Time passing while paused changes nothing.
        assert_eq!(timer.remaining(later + secs(500)), secs(70));

        let resumed_at = later + secs(10);
        timer.toggle_pause(resumed_at);
        assert_eq!(timer.remaining(resumed_at + secs(20)), secs(50));
    }

    #[test]
    fn toggle_pause_on_idle_timer_does_nothing() {
        let now = Instant::now();
        let mut bank = TimerBank::new();
        let id = bank.create("t".into(), secs(10)).unwrap();
        let timer = bank.get_mut(id).unwrap();
        timer.toggle_pause(now);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(now), secs(10));
    }

    #[test]
    fn tick_resets_expired_timers_and_reports_them() {
        let now = Instant::now();
        let mut bank = TimerBank::new();
        let short = bank.create("short".into(), secs(5)).unwrap();
        let long = bank.create("long".into(), secs(500)).unwrap();
        bank.get_mut(short).unwrap().start(now);
        bank.get_mut(long).unwrap().start(now);

        assert!(bank.tick(now + secs(1)).is_empty());
        let expired = bank.tick(now + secs(6));
        assert_eq!(expired, vec![short]);

        let timer = bank.get_mut(short).unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(now + secs(6)), secs(5));
    }

    #[test]
    fn form_digits_wrap_at_their_maxima() {
        let mut form = TimerForm::default();
        form.increment(2);
        for _ in 0..5 {
            form.increment(2);
        }
        assert_eq!(form.digits()[2], 0, "tens of minutes wraps after 5");

        form.decrement(4);
        assert_eq!(form.digits()[4], 5, "tens of seconds wraps to 5");
        form.decrement(1);
        assert_eq!(form.digits()[1], 9);
    }

    #[test]
    fn form_duration_reads_hhmmss() {
        let mut form = TimerForm::default();
        // 01:23:45
        form.increment(1);
        form.increment(2);
        form.increment(2);
        form.increment(3);
        form.increment(3);
        form.increment(3);
        form.increment(4);
        form.increment(4);
        form.increment(4);
        form.increment(4);
        form.increment(5);
        form.increment(5);
        form.increment(5);
        form.increment(5);
        form.increment(5);
        assert_eq!(form.digits(), [0, 1, 2, 3, 4, 5]);
        assert_eq!(form.duration(), secs(3600 + 23 * 60 + 45));
        assert!(!form.is_zero());
    }

    #[test]
    fn hms_rounds_partial_seconds_up() {
        assert_eq!(format_hms(Duration::from_millis(1500)), "00:00:02");
        assert_eq!(format_hms(secs(3661)), "01:01:01");
        assert_eq!(format_hms(Duration::ZERO), "00:00:00");
    }
}
