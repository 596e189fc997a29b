//! Keypress sources for playback and typing cancellation.
//!
//! The engine only needs two operations: block until the next key, and poll
//! for a pending key without blocking. [`TerminalKeys`] backs these with
//! crossterm events; [`ScriptedKeys`] feeds a fixed sequence for tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyCode, KeyModifiers};
use crossterm::terminal;

/// A single decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Esc,
    CtrlC,
    Enter,
    Char(char),
    Other,
}

impl Key {
    /// Whether this key aborts playback.
    pub fn is_cancel(self) -> bool {
        matches!(self, Key::Esc | Key::CtrlC)
    }
}

/// Source of operator keypresses.
pub trait KeySource {
    /// Block until the next keypress.
    fn wait_key(&mut self) -> io::Result<Key>;

    /// Return a pending keypress, or `None` if no key is waiting.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}

/// Crossterm-backed key source reading from the controlling terminal.
///
/// Raw mode is enabled only for the duration of each call, so command output
/// and prompt rendering in between happen with the terminal in cooked mode.
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        TerminalKeys
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn translate(event: Event) -> Option<Key> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => Some(match code {
            KeyCode::Esc => Key::Esc,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
            KeyCode::Enter => Key::Enter,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }),
        _ => None,
    }
}

impl KeySource for TerminalKeys {
    fn wait_key(&mut self) -> io::Result<Key> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Some(key) = translate(event::read()?) {
                return Ok(key);
            }
        }
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        let _raw = RawModeGuard::enable()?;
        while event::poll(Duration::ZERO)? {
            if let Some(key) = translate(event::read()?) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// Scripted key source for tests: `wait_key` pops keys from a fixed queue,
/// `poll_key` never reports a key.
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn wait_key(&mut self) -> io::Result<Key> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted key sequence exhausted")
        })
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        Ok(None)
    }
}
