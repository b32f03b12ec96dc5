//! Typewriter reveal for the headline
//!
//! The reveal waits for a start delay, then an interval ticks every
//! [`TYPE_INTERVAL_MS`]. The first tick shows the empty prefix and each
//! subsequent tick shows one more character, so a string of `n` characters
//! is complete after `delay + (n + 1) * interval`.
//!
//! Invariants:
//! 1. The visible text is always a prefix of the target ending on a char boundary.
//! 2. Visible length never decreases while the reveal is live.
//! 3. Once cancelled, the visible text never changes again.

use std::time::Duration;

use crate::consts::{HEADLINE_DELAY_MS, TYPE_INTERVAL_MS};

/// Interval floor, avoids division by zero on degenerate settings
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Number of characters visible `elapsed` after the reveal was scheduled
pub fn revealed_chars(
    elapsed: Duration,
    delay: Duration,
    interval: Duration,
    char_count: usize,
) -> usize {
    let Some(typing) = elapsed.checked_sub(delay) else {
        return 0;
    };
    let interval = interval.max(MIN_INTERVAL);
    let ticks = typing.as_nanos() / interval.as_nanos();
    let shown = ticks.saturating_sub(1);
    usize::try_from(shown).unwrap_or(usize::MAX).min(char_count)
}

/// Lazy sequence of every prefix of a string, from empty to full
///
/// Consumes itself as it goes; there is no way to rewind.
#[derive(Debug, Clone)]
pub struct Prefixes<'a> {
    text: &'a str,
    next_end: Option<usize>,
}

impl<'a> Prefixes<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            next_end: Some(0),
        }
    }
}

impl<'a> Iterator for Prefixes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let end = self.next_end?;
        let prefix = &self.text[..end];
        self.next_end = if end == self.text.len() {
            None
        } else {
            self.text[end..].chars().next().map(|c| end + c.len_utf8())
        };
        Some(prefix)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_end {
            Some(end) => self.text[end..].chars().count() + 1,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Prefixes<'_> {}
impl std::iter::FusedIterator for Prefixes<'_> {}

/// Where the reveal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting out the start delay
    Pending,
    /// Interval running
    Typing,
    /// Full text shown, interval stopped
    Done,
    /// Torn down before completion; frozen
    Cancelled,
}

/// Stateful typewriter driven by elapsed time
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    char_count: usize,
    delay: Duration,
    interval: Duration,
    elapsed: Duration,
    shown: usize,
    phase: RevealPhase,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, delay: Duration) -> Self {
        Self::with_interval(text, delay, Duration::from_millis(TYPE_INTERVAL_MS))
    }

    pub fn with_interval(text: impl Into<String>, delay: Duration, interval: Duration) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            delay,
            interval: interval.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
            shown: 0,
            phase: RevealPhase::Pending,
        }
    }

    /// Headline reveal with the default delay
    pub fn headline(text: impl Into<String>) -> Self {
        Self::new(text, Duration::from_millis(HEADLINE_DELAY_MS))
    }

    /// Advance the reveal clock. Returns true if the visible prefix changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.phase {
            RevealPhase::Done | RevealPhase::Cancelled => return false,
            RevealPhase::Pending | RevealPhase::Typing => {}
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.delay {
            return false;
        }

        let ticks = (self.elapsed - self.delay).as_nanos() / self.interval.as_nanos();
        if ticks > 0 {
            self.phase = RevealPhase::Typing;
        }

        let target = revealed_chars(self.elapsed, self.delay, self.interval, self.char_count);
        let changed = target > self.shown;
        self.shown = self.shown.max(target);

        // The interval clears itself on the tick after the last character
        if ticks > self.char_count as u128 + 1 {
            self.phase = RevealPhase::Done;
        }
        changed
    }

    /// Currently visible prefix
    pub fn visible(&self) -> &str {
        Prefixes::new(&self.text)
            .nth(self.shown)
            .unwrap_or(self.text.as_str())
    }

    pub fn visible_chars(&self) -> usize {
        self.shown
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// True once every character is visible
    pub fn is_complete(&self) -> bool {
        self.shown == self.char_count
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == RevealPhase::Cancelled
    }

    /// True while a timer would still be scheduled
    pub fn is_live(&self) -> bool {
        matches!(self.phase, RevealPhase::Pending | RevealPhase::Typing)
    }

    /// Stop all further progress. Safe to call at any point, including twice.
    pub fn cancel(&mut self) {
        if self.is_live() {
            log::debug!(
                "Reveal cancelled at {}/{} chars",
                self.shown,
                self.char_count
            );
            self.phase = RevealPhase::Cancelled;
        }
    }

    /// Point the reveal at new inputs. Unchanged inputs keep current progress;
    /// anything else cancels the old reveal and starts over.
    pub fn retarget(&mut self, text: &str, delay: Duration) -> bool {
        if self.text == text && self.delay == delay {
            return false;
        }
        self.cancel();
        *self = Self::with_interval(text, delay, self.interval);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HEADLINE: &str = "Will you be my Valentine?";

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_revealed_chars_before_delay() {
        assert_eq!(revealed_chars(ms(0), ms(500), ms(50), 25), 0);
        assert_eq!(revealed_chars(ms(499), ms(500), ms(50), 25), 0);
    }

    #[test]
    fn test_headline_scenario() {
        let n = HEADLINE.chars().count();
        assert_eq!(revealed_chars(ms(500), ms(500), ms(50), n), 0);
        // First tick still shows the empty prefix
        assert_eq!(revealed_chars(ms(550), ms(500), ms(50), n), 0);
        assert_eq!(revealed_chars(ms(600), ms(500), ms(50), n), 1);
        assert_eq!(revealed_chars(ms(500 + 26 * 50), ms(500), ms(50), n), n);
    }

    #[test]
    fn test_typewriter_headline_completes() {
        let mut tw = Typewriter::headline(HEADLINE);
        assert!(!tw.advance(ms(500)));
        assert_eq!(tw.visible(), "");

        for _ in 0..26 {
            tw.advance(ms(50));
        }
        assert_eq!(tw.visible(), HEADLINE);
        assert!(tw.is_complete());

        // One more tick clears the interval
        tw.advance(ms(50));
        assert_eq!(tw.phase(), RevealPhase::Done);
        assert!(!tw.advance(ms(1000)));
        assert_eq!(tw.visible(), HEADLINE);
    }

    #[test]
    fn test_empty_text_reveals_nothing() {
        let mut tw = Typewriter::new("", ms(0));
        for _ in 0..10 {
            assert!(!tw.advance(ms(50)));
        }
        assert_eq!(tw.visible(), "");
        assert!(tw.is_complete());
        assert_eq!(tw.phase(), RevealPhase::Done);
    }

    #[test]
    fn test_cancel_freezes_progress() {
        let mut tw = Typewriter::new(HEADLINE, ms(0));
        tw.advance(ms(300));
        let frozen = tw.visible().to_string();
        assert!(!frozen.is_empty());

        tw.cancel();
        tw.cancel();
        assert!(tw.is_cancelled());
        assert!(!tw.advance(ms(10_000)));
        assert_eq!(tw.visible(), frozen);
    }

    #[test]
    fn test_cancel_before_delay() {
        let mut tw = Typewriter::new(HEADLINE, ms(500));
        tw.advance(ms(100));
        tw.cancel();
        tw.advance(ms(5_000));
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_retarget_restarts() {
        let mut tw = Typewriter::new("hello", ms(0));
        tw.advance(ms(200));
        assert_eq!(tw.visible(), "hel");

        assert!(!tw.retarget("hello", ms(0)));
        assert_eq!(tw.visible(), "hel");

        assert!(tw.retarget("bye", ms(100)));
        assert_eq!(tw.visible(), "");
        assert_eq!(tw.phase(), RevealPhase::Pending);
        tw.advance(ms(100 + 4 * 50));
        assert_eq!(tw.visible(), "bye");
    }

    #[test]
    fn test_multibyte_prefixes() {
        let mut tw = Typewriter::new("❤️ hi", ms(0));
        tw.advance(ms(100));
        assert_eq!(tw.visible(), "❤");
        tw.advance(ms(1_000));
        assert_eq!(tw.visible(), "❤️ hi");
    }

    #[test]
    fn test_prefixes_sequence() {
        let all: Vec<&str> = Prefixes::new("abc").collect();
        assert_eq!(all, vec!["", "a", "ab", "abc"]);

        let mut it = Prefixes::new("");
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some(""));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    proptest! {
        #[test]
        fn prop_reveal_monotonic_prefix(
            text in "\\PC{0,40}",
            delay_ms in 0u64..2_000,
            steps in proptest::collection::vec(0u64..120, 1..80),
        ) {
            let mut tw = Typewriter::new(text.clone(), ms(delay_ms));
            let mut last = 0;
            for step in steps {
                tw.advance(ms(step));
                prop_assert!(text.starts_with(tw.visible()));
                prop_assert!(tw.visible_chars() >= last);
                prop_assert!(tw.visible_chars() <= text.chars().count());
                last = tw.visible_chars();
            }

            let n = text.chars().count() as u64;
            tw.advance(ms(delay_ms + (n + 2) * TYPE_INTERVAL_MS));
            prop_assert_eq!(tw.visible(), text.as_str());
        }

        #[test]
        fn prop_cancel_stops_updates(
            text in "[a-z ]{1,30}",
            before in 0u64..2_000,
            after in 0u64..5_000,
        ) {
            let mut tw = Typewriter::new(text, ms(100));
            tw.advance(ms(before));
            let frozen = tw.visible().to_string();
            tw.cancel();
            prop_assert!(!tw.advance(ms(after)));
            prop_assert_eq!(tw.visible(), frozen.as_str());
        }
    }
}
