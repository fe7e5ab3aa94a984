//! Count-up animation for the public KPI counters.

use std::time::Duration;

use crate::models::CounterValue;

/// Delay between animation frames.
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountUp {
    target: u64,
    duration: Duration,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Reads a displayed number such as `"12,480"`; `None` means "do not animate".
    pub fn from_text(text: &str, duration: Duration) -> Option<Self> {
        text.parse::<CounterValue>()
            .ok()
            .map(|value| Self::new(value.0, duration))
    }

    #[cfg(test)]
    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn frame_count(&self) -> u32 {
        let frames = self.duration.as_millis() / FRAME.as_millis();
        frames.max(1) as u32
    }

    /// Value shown `elapsed` into the animation, easing out exponentially.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.target;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - 2f64.powf(-10.0 * progress);
        // ease-out-expo tops out at 1023/1024; scale so the curve lands on the target.
        let scaled = eased * 1024.0 / 1023.0;
        ((self.target as f64) * scaled).round().min(self.target as f64) as u64
    }

    /// Value for a 1-based frame number; frames past the end hold the target.
    pub fn value_at_frame(&self, frame: u32) -> u64 {
        if frame >= self.frame_count() {
            self.target
        } else {
            self.value_at(FRAME * frame)
        }
    }

    /// Values for every frame; the last is always the target.
    #[cfg(test)]
    pub fn frames(&self) -> impl Iterator<Item = u64> + '_ {
        (1..=self.frame_count()).map(move |frame| self.value_at_frame(frame))
    }
}

/// Thousands-separated display, e.g. `12,480`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
