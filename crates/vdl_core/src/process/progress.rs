//! Marker-driven progress heuristic.

/// Ceiling while the tool is still running.
const RUNNING_CAP: f32 = 99.0;

/// Monotonic progress bounded to 0..=100.
///
/// Marker lines advance it by a fixed step but it stays at or below 99
/// until [`complete`](Self::complete) is called.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    value: f32,
    step: f32,
    completed: bool,
    markers_seen: usize,
}

impl ProgressTracker {
    /// Tracker advancing `step` percent per marker. Non-positive steps are clamped.
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
        Self {
            value: 0.0,
            step,
            completed: false,
            markers_seen: 0,
        }
    }

    /// Advance if `line` contains `marker`. Returns the new percentage when it moved.
    pub fn observe(&mut self, line: &str, marker: &str) -> Option<u32> {
        if marker.is_empty() || !line.contains(marker) {
            return None;
        }
        self.markers_seen += 1;
        self.advance()
    }

    /// Advance one step. Returns the new percentage when it moved.
    pub fn advance(&mut self) -> Option<u32> {
        if self.completed {
            return None;
        }
        let before = self.percent();
        self.value = (self.value + self.step).min(RUNNING_CAP);
        let after = self.percent();
        (after != before).then_some(after)
    }

    /// Mark confirmed completion. Returns `true` only the first time.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.value = 100.0;
        true
    }

    pub fn percent(&self) -> u32 {
        self.value.floor() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Lines passed to [`observe`](Self::observe) that contained the marker.
    pub fn markers_seen(&self) -> usize {
        self.markers_seen
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_marker_lines_advance() {
        let mut tracker = ProgressTracker::new(10.0);
        assert_eq!(tracker.observe("frame=1", "Downloading"), None);
        assert_eq!(tracker.observe("Downloading part 1", "Downloading"), Some(10));
        assert_eq!(tracker.observe("Downloading part 2", ""), None);
        assert_eq!(tracker.percent(), 10);
        assert_eq!(tracker.markers_seen(), 1);
    }

    #[test]
    fn never_reaches_100_while_running() {
        let mut tracker = ProgressTracker::new(7.0);
        for _ in 0..100 {
            tracker.advance();
        }
        assert_eq!(tracker.percent(), 99);
        assert_eq!(tracker.advance(), None);

        // Capped lines still count as markers.
        assert_eq!(tracker.observe("progress", "progress"), None);
        assert_eq!(tracker.markers_seen(), 1);
    }

    #[test]
    fn completion_is_set_once() {
        let mut tracker = ProgressTracker::default();
        tracker.advance();
        assert!(tracker.complete());
        assert_eq!(tracker.percent(), 100);
        assert!(!tracker.complete());
        assert_eq!(tracker.advance(), None);
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn bad_step_falls_back() {
        let mut tracker = ProgressTracker::new(-3.0);
        assert_eq!(tracker.advance(), Some(1));
        let mut tracker = ProgressTracker::new(f32::NAN);
        assert_eq!(tracker.advance(), Some(1));
    }
}
