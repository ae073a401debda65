/// Direction a kill (cut) was performed in. Two kills in the same direction
/// that immediately follow one another are merged into a single ring entry
/// instead of pushing a new one, mirroring Emacs' kill-ring behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillDirection {
    Forward,
    Backward,
}

/// Bounded ring of killed (cut) text with Emacs yank/yank-pop semantics.
///
/// The ring holds at most [`KillRing::MAX_ENTRIES`] entries, most-recent
/// first. Consecutive kills in the same direction are appended/prepended to
/// `ring[0]` rather than creating a new entry; any other edit operation
/// resets that coalescing behavior.
#[derive(Debug, Clone)]
pub struct KillRing {
    ring: Vec<Vec<char>>,
    last_direction: Option<KillDirection>,
    last_was_kill: bool,
    yank_active: bool,
    yank_start: usize,
    yank_end: usize,
    index: usize,
}

impl KillRing {
    pub const MAX_ENTRIES: usize = 30;

    pub fn new() -> Self {
        Self {
            ring: Vec::new(),
            last_direction: None,
            last_was_kill: false,
            yank_active: false,
            yank_start: 0,
            yank_end: 0,
            index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn yank_active(&self) -> bool {
        self.yank_active
    }

    pub fn yank_range(&self) -> (usize, usize) {
        (self.yank_start, self.yank_end)
    }

    /// Record a kill of `text` in the given `direction`. An empty kill only
    /// updates `last_direction` and never sets `last_was_kill` - this keeps
    /// e.g. a no-op Ctrl-K at end-of-line from poisoning the next real kill's
    /// coalescing decision.
    pub fn record_kill(&mut self, text: &[char], direction: KillDirection) {
        self.yank_active = false;

        if text.is_empty() {
            self.last_direction = Some(direction);
            return;
        }

        if self.last_was_kill && self.last_direction == Some(direction) && !self.ring.is_empty() {
            let head = &mut self.ring[0];
            match direction {
                KillDirection::Forward => head.extend_from_slice(text),
                KillDirection::Backward => {
                    let mut merged = text.to_vec();
                    merged.extend_from_slice(head);
                    *head = merged;
                }
            }
        } else {
            self.ring.insert(0, text.to_vec());
            if self.ring.len() > Self::MAX_ENTRIES {
                self.ring.pop();
            }
        }

        self.last_was_kill = true;
        self.last_direction = Some(direction);
    }

    /// Any non-kill editing operation calls this to stop the next kill from
    /// merging into the previous entry.
    pub fn clear_last_kill(&mut self) {
        self.last_was_kill = false;
    }

    /// Any non-yank editing operation calls this to invalidate `YankPop`.
    pub fn clear_yank(&mut self) {
        self.yank_active = false;
    }

    /// Returns the text that `Yank` would insert at `pos`, along with the
    /// `[yank_start, yank_end)` range it would occupy once inserted.
    pub fn yank(&mut self, pos: usize) -> Option<Vec<char>> {
        let head = self.ring.first()?.clone();
        self.yank_start = pos;
        self.yank_end = pos + head.len();
        self.yank_active = true;
        self.index = 0;
        self.last_was_kill = false;
        Some(head)
    }

    /// Cycles to the next ring entry and returns the replacement text for the
    /// `[yank_start, yank_end)` region, updating `yank_end` to match the new
    /// text's length. Returns `None` if not in an active yank, or the ring
    /// has fewer than two entries (nothing to cycle to).
    pub fn yank_pop(&mut self) -> Option<Vec<char>> {
        if !self.yank_active || self.ring.len() < 2 {
            return None;
        }
        self.index = (self.index + 1) % self.ring.len();
        let replacement = self.ring[self.index].clone();
        self.yank_end = self.yank_start + replacement.len();
        Some(replacement)
    }
}

impl Default for KillRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn empty_kill_sets_direction_but_not_last_was_kill() {
        let mut ring = KillRing::new();
        ring.record_kill(&[], KillDirection::Forward);
        assert!(!ring.last_was_kill);
        assert!(ring.is_empty());
    }

    #[test]
    fn same_direction_kills_coalesce() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("bar "), KillDirection::Backward);
        ring.record_kill(&chars("foo "), KillDirection::Backward);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.ring[0], chars("foo bar "));
    }

    #[test]
    fn forward_kills_append() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("foo"), KillDirection::Forward);
        ring.record_kill(&chars("bar"), KillDirection::Forward);
        assert_eq!(ring.ring[0], chars("foobar"));
    }

    #[test]
    fn direction_change_pushes_new_entry() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("foo"), KillDirection::Forward);
        ring.record_kill(&chars("bar"), KillDirection::Backward);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn non_kill_op_starts_new_entry_regardless_of_direction() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("foo"), KillDirection::Forward);
        ring.clear_last_kill();
        ring.record_kill(&chars("bar"), KillDirection::Forward);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn ring_is_bounded() {
        let mut ring = KillRing::new();
        for i in 0..40 {
            ring.clear_last_kill();
            ring.record_kill(&chars(&i.to_string()), KillDirection::Forward);
        }
        assert_eq!(ring.len(), KillRing::MAX_ENTRIES);
    }

    #[test]
    fn yank_pop_requires_active_yank_and_at_least_two_entries() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("only"), KillDirection::Forward);
        ring.yank(0);
        assert_eq!(ring.yank_pop(), None);
    }

    #[test]
    fn yank_pop_cycles() {
        let mut ring = KillRing::new();
        ring.record_kill(&chars("bar baz"), KillDirection::Forward);
        ring.clear_last_kill();
        ring.record_kill(&chars("baz"), KillDirection::Forward);
        ring.yank(0);
        let popped = ring.yank_pop();
        assert_eq!(popped, Some(chars("bar baz")));
    }
}
