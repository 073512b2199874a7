/// Authoritative selected segment and the one before it.
///
/// Only [`TabStrip`](crate::strip::TabStrip) mutates this, through its
/// selection entry point (and index clamping when segments disappear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    current: usize,
    previous: Option<usize>,
}

impl SelectionState {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Returns `false` (and changes nothing) when `index` is already current.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index == self.current {
            return false;
        }
        self.previous = Some(self.current);
        self.current = index;
        true
    }

    /// Keeps both indices inside `[0, segment_count)`.
    pub(crate) fn clamp(&mut self, segment_count: usize) {
        let last = segment_count.max(1) - 1;
        self.current = self.current.min(last);
        self.previous = self.previous.map(|p| p.min(last)).filter(|&p| p != self.current);
    }
}
