use super::super::state::App;
use std::time::Instant;
use tracing::info;

impl App {
    pub(super) fn handle_timer_name_changed(&mut self, name: String) {
        self.timers.form.name = name;
    }

    pub(super) fn handle_timer_digit_incremented(&mut self, index: usize) {
        self.timers.form.increment(index);
        self.timers.form_error = None;
    }

    pub(super) fn handle_timer_digit_decremented(&mut self, index: usize) {
        self.timers.form.decrement(index);
        self.timers.form_error = None;
    }

    pub(super) fn handle_create_timer(&mut self) {
        if self.timers.form.is_zero() {
            self.timers.form_error = Some("Set a duration first".to_string());
            return;
        }
        if self.timers.bank.is_full() {
            self.timers.form_error = Some("All ten timer slots are in use".to_string());
            return;
        }
        let name = if self.timers.form.name.trim().is_empty() {
            "Timer".to_string()
        } else {
            self.timers.form.name.trim().to_string()
        };
        let duration = self.timers.form.duration();
        if let Some(id) = self.timers.bank.create(name.clone(), duration) {
            info!(id, name, ?duration, "Created timer");
            self.timers.form.clear();
            self.timers.form_error = None;
        }
    }

    pub(super) fn handle_start_timer(&mut self, id: u8) {
        let now = Instant::now();
        self.timers.last_tick = now;
        if let Some(timer) = self.timers.bank.get_mut(id) {
            timer.start(now);
        }
    }

    pub(super) fn handle_toggle_pause_timer(&mut self, id: u8) {
        let now = Instant::now();
        self.timers.last_tick = now;
        if let Some(timer) = self.timers.bank.get_mut(id) {
            timer.toggle_pause(now);
        }
    }

    pub(super) fn handle_reset_timer(&mut self, id: u8) {
        if let Some(timer) = self.timers.bank.get_mut(id) {
            timer.reset();
        }
    }

    pub(super) fn handle_remove_timer(&mut self, id: u8) {
        self.timers.bank.remove(id);
    }

    pub(super) fn handle_dismiss_timer_notice(&mut self) {
        self.timers.notice = None;
    }
}
