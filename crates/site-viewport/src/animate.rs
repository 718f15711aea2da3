//! Frame-stepped counters and typewriter text.
//!
//! Both start when their element first scrolls into view (the host uses a
//! visibility observer for that) and are then stepped by the host: counters
//! once per animation frame, typewriters once per `speed` interval.

use std::time::Duration;

/// Leading integer of an attribute value, in the manner of `parseInt`
/// (`"250+"` parses as 250, `"abc"` does not parse).
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    let digits: String = raw.trim_start().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// One rendered counter frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    /// Text content to show.
    pub value: u64,
    /// Whether this is the final frame.
    pub done: bool,
}

/// Counts a `[data-counter]` element up from zero to its target.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    /// Animate to `target` over roughly `duration`, one step per `frame`.
    pub fn new(target: u64, duration: Duration, frame: Duration) -> Self {
        let frames = if frame.is_zero() {
            1.0
        } else {
            (duration.as_nanos() as f64 / frame.as_nanos() as f64).max(1.0)
        };
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    /// Build from the raw `data-counter` attribute.
    pub fn from_attribute(raw: &str, duration: Duration, frame: Duration) -> Option<Self> {
        parse_leading_int(raw).map(|target| Self::new(target, duration, frame))
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame. After the final frame keeps returning the target.
    pub fn tick(&mut self) -> CounterFrame {
        if self.done {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }

        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame {
                value: self.current.floor() as u64,
                done: false,
            }
        } else {
            self.done = true;
            CounterFrame {
                value: self.target,
                done: true,
            }
        }
    }
}

/// Types out a `[data-typing]` element's text one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    speed: Duration,
}

impl Typewriter {
    /// Used when `data-typing` is missing, zero or not a number.
    pub const DEFAULT_SPEED: Duration = Duration::from_millis(100);

    /// `speed_attr` is the raw `data-typing` value (milliseconds per character).
    pub fn new(text: &str, speed_attr: Option<&str>) -> Self {
        let speed = speed_attr
            .and_then(parse_leading_int)
            .filter(|ms| *ms > 0)
            .map_or(Self::DEFAULT_SPEED, Duration::from_millis);
        Self {
            chars: text.chars().collect(),
            shown: 0,
            speed,
        }
    }

    /// Delay between characters.
    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Text currently shown.
    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Reveal the next character. Returns the new text, or `None` once the
    /// whole text is shown.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }
        self.shown += 1;
        Some(self.visible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(2000);
    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("250"), Some(250));
        assert_eq!(parse_leading_int(" 42+"), Some(42));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_counter_reaches_target() {
        let mut counter = CounterAnimation::new(250, DURATION, FRAME);
        let mut frames = Vec::new();
        loop {
            let frame = counter.tick();
            frames.push(frame.value);
            if frame.done {
                break;
            }
        }

        // 2000ms / 16ms = 125 frames
        assert_eq!(frames.len(), 125);
        assert_eq!(frames[0], 2);
        assert_eq!(*frames.last().unwrap(), 250);
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_counter_zero_target_finishes_immediately() {
        let mut counter = CounterAnimation::new(0, DURATION, FRAME);
        assert_eq!(counter.tick(), CounterFrame { value: 0, done: true });
        assert!(counter.is_done());
    }

    #[test]
    fn test_counter_from_attribute() {
        assert!(CounterAnimation::from_attribute("n/a", DURATION, FRAME).is_none());
        let counter = CounterAnimation::from_attribute("1500", DURATION, FRAME).unwrap();
        assert_eq!(counter.target(), 1500);
    }

    #[test]
    fn test_typewriter() {
        let mut writer = Typewriter::new("Hoş", Some("50"));
        assert_eq!(writer.speed(), Duration::from_millis(50));
        assert_eq!(writer.tick().as_deref(), Some("H"));
        assert_eq!(writer.tick().as_deref(), Some("Ho"));
        assert_eq!(writer.tick().as_deref(), Some("Hoş"));
        assert_eq!(writer.tick(), None);
        assert!(writer.is_done());
    }

    #[test]
    fn test_typewriter_default_speed() {
        assert_eq!(Typewriter::new("x", None).speed(), Typewriter::DEFAULT_SPEED);
        assert_eq!(Typewriter::new("x", Some("fast")).speed(), Typewriter::DEFAULT_SPEED);
        assert_eq!(Typewriter::new("x", Some("0")).speed(), Typewriter::DEFAULT_SPEED);
    }
}
