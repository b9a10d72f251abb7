//! Page navigation state for the reader.
//!
//! Tracks the current page, zoom and rotation independently of the
//! highlight store. The page count is unknown until the renderer reports
//! it, so jumps are clamped lazily: an out-of-range target is reined in
//! as soon as a count arrives.

/// Minimum allowed font size for reflowable documents (points).
pub const MIN_FONT_SIZE: u32 = 10;
/// Maximum allowed font size for reflowable documents (points).
pub const MAX_FONT_SIZE: u32 = 36;
/// Font size shortcut step (points).
pub const FONT_SIZE_STEP: u32 = 2;

/// Minimum page scale for fixed-layout documents.
pub const MIN_SCALE: f32 = 0.3;
/// Maximum page scale for fixed-layout documents.
pub const MAX_SCALE: f32 = 5.0;
/// Multiplicative zoom step.
pub const SCALE_STEP: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageNavigator {
    page: usize,
    page_count: Option<usize>,
    scale: f32,
    /// Degrees, always one of 0, 90, 180, 270.
    rotation: u16,
}

impl Default for PageNavigator {
    fn default() -> Self {
        PageNavigator {
            page: 0,
            page_count: None,
            scale: 1.0,
            rotation: 0,
        }
    }
}

impl PageNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    /// Record the renderer-reported page count and clamp the current page
    /// into range. A zero count pins the page to 0.
    pub fn set_page_count(&mut self, count: usize) {
        self.page_count = Some(count);
        self.page = self.page.min(count.saturating_sub(1));
    }

    /// Jump to a 0-based page, clamped to the known range. With no count
    /// reported yet the target is accepted as-is.
    pub fn go_to(&mut self, page: usize) {
        self.page = match self.page_count {
            Some(count) => page.min(count.saturating_sub(1)),
            None => page,
        };
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = (self.rotation + 90) % 360;
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = (self.rotation + 270) % 360;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_jumps_clamp_to_reported_count() {
        let mut nav = PageNavigator::new();
        nav.go_to(40);
        assert_eq!(nav.page(), 40, "unclamped while count is unknown");

        nav.set_page_count(12);
        assert_eq!(nav.page(), 11);
        nav.go_to(3);
        nav.next_page();
        assert_eq!(nav.page(), 4);
        nav.go_to(999);
        assert_eq!(nav.page(), 11);
    }

    #[test]
    fn prev_page_stops_at_zero() {
        let mut nav = PageNavigator::new();
        nav.prev_page();
        assert_eq!(nav.page(), 0);
    }

    #[test]
    fn zero_page_count_pins_to_first_page() {
        let mut nav = PageNavigator::new();
        nav.go_to(5);
        nav.set_page_count(0);
        assert_eq!(nav.page(), 0);
        nav.next_page();
        assert_eq!(nav.page(), 0);
    }

    #[test]
    fn zoom_is_multiplicative_and_clamped() {
        let mut nav = PageNavigator::new();
        nav.zoom_in();
        assert!((nav.scale() - 1.5).abs() < 1e-6);
        for _ in 0..10 {
            nav.zoom_in();
        }
        assert!((nav.scale() - MAX_SCALE).abs() < 1e-6);
        for _ in 0..20 {
            nav.zoom_out();
        }
        assert!((nav.scale() - MIN_SCALE).abs() < 1e-6);
    }

    #[test]
    fn rotation_wraps_in_quarter_turns() {
        let mut nav = PageNavigator::new();
        nav.rotate_cw();
        assert_eq!(nav.rotation(), 90);
        nav.rotate_ccw();
        nav.rotate_ccw();
        assert_eq!(nav.rotation(), 270);
        for _ in 0..4 {
            nav.rotate_cw();
        }
        assert_eq!(nav.rotation(), 270);
    }
}
