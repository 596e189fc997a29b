//! Character-by-character typing simulation.
//!
//! Emits text one Unicode scalar at a time with a jittered, speed-scaled
//! delay before each keystroke, so replayed commands look hand-typed. The
//! key source is polled between sleep slices and after every character, so
//! a cancel keystroke stops output within roughly one character's delay.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::input::KeySource;

/// Jitter bounds for the base per-character delay, in milliseconds.
const JITTER_MIN_MS: u64 = 35;
const JITTER_MAX_MS: u64 = 90;

/// Longest uninterrupted sleep between cancellation polls.
const POLL_SLICE: Duration = Duration::from_millis(15);

/// How a typing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The whole string was emitted.
    Completed,
    /// A cancel keystroke stopped output mid-string.
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum TypingError {
    #[error("speed factor must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Simulates live typing onto a writer.
pub struct TypingSimulator {
    rng: StdRng,
}

impl TypingSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulator for tests: the delay sequence is a pure
    /// function of the seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_delay(&mut self, speed: f64) -> Duration {
        let base_ms = self.rng.gen_range(JITTER_MIN_MS..=JITTER_MAX_MS) as f64;
        Duration::from_secs_f64(base_ms / 1000.0 / speed)
    }

    /// Type `text` onto `out` at `speed` times the base rate, watching
    /// `keys` for a cancel keystroke.
    ///
    /// Characters are Unicode scalars: a multi-byte character is one
    /// keystroke, not one per encoded byte. Returns [`Outcome::Cancelled`]
    /// as soon as a cancel key is seen; no further characters are emitted.
    pub fn type_out(
        &mut self,
        out: &mut dyn Write,
        text: &str,
        speed: f64,
        keys: &mut dyn KeySource,
    ) -> Result<Outcome, TypingError> {
        if !(speed > 0.0) {
            return Err(TypingError::InvalidSpeed(speed));
        }
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            let mut remaining = self.next_delay(speed);
            while !remaining.is_zero() {
                let slice = remaining.min(POLL_SLICE);
                thread::sleep(slice);
                remaining -= slice;
                if poll_cancel(keys)? {
                    return Ok(Outcome::Cancelled);
                }
            }
            out.write_all(ch.encode_utf8(&mut utf8).as_bytes())?;
            out.flush()?;
            if poll_cancel(keys)? {
                return Ok(Outcome::Cancelled);
            }
        }
        Ok(Outcome::Completed)
    }
}

impl Default for TypingSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain pending keys, reporting whether any of them cancels.
fn poll_cancel(keys: &mut dyn KeySource) -> io::Result<bool> {
    while let Some(key) = keys.poll_key()? {
        if key.is_cancel() {
            return Ok(true);
        }
    }
    Ok(false)
}
