use crate::timers::{TimerBank, TimerForm};
use std::time::Instant;

/// Timer tool model. `last_tick` is what the view renders remaining
/// times against, so the whole pane redraws from one clock reading.
pub struct TimerState {
    pub(in crate::app) bank: TimerBank,
    pub(in crate::app) form: TimerForm,
    pub(in crate::app) form_error: Option<String>,
    pub(in crate::app) notice: Option<String>,
    pub(in crate::app) last_tick: Instant,
}

impl TimerState {
    pub(in crate::app) fn new() -> Self {
        TimerState {
            bank: TimerBank::new(),
            form: TimerForm::default(),
            form_error: None,
            notice: None,
            last_tick: Instant::now(),
        }
    }
}
