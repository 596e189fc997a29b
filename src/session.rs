//! Session file grammar: parsing and serialization.
//!
//! A session file is plain UTF-8 text. Lines starting with `#livedemo` carry
//! directives (`#livedemo shell: /bin/bash`), other `#` lines are comments,
//! blank lines are ignored, and everything else is a command to replay.

use std::collections::HashMap;

/// Marker that introduces a directive line.
pub const DIRECTIVE_PREFIX: &str = "#livedemo ";

/// One parsed line of a session file, in playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Metadata line configuring shell, prompt theme, speed, or env vars.
    Directive { key: String, value: String },
    /// A single line of shell input.
    Command(String),
}

/// An ordered sequence of directives and commands parsed from session text.
///
/// Immutable once parsed. Order is significant: it is the playback order,
/// and directives apply to the commands that follow them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    entries: Vec<Entry>,
}

impl Session {
    /// Parse session text. This never fails: malformed directive lines fall
    /// back to comments, and any other non-blank, non-comment line is taken
    /// verbatim as a command.
    pub fn parse(text: &str) -> Session {
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix(DIRECTIVE_PREFIX) {
                if let Some((key, value)) = rest.split_once(':') {
                    entries.push(Entry::Directive {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    });
                    continue;
                }
                // A marker line without `key: value` is just a comment.
            }
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            entries.push(Entry::Command(line.to_string()));
        }
        Session { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Commands in playback order, directives skipped.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Command(c) => Some(c.as_str()),
            Entry::Directive { .. } => None,
        })
    }

    /// Value of the first directive with the given key, if any.
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            Entry::Directive { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Environment overrides accumulated from `env` directives.
    ///
    /// Each `#livedemo env: NAME=value` line contributes one entry; later
    /// lines win on duplicate names. Lines without `=` are ignored.
    pub fn env_overrides(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        for entry in &self.entries {
            if let Entry::Directive { key, value } = entry {
                if key == "env" {
                    match value.split_once('=') {
                        Some((name, val)) => {
                            env.insert(name.trim().to_string(), val.trim().to_string());
                        }
                        None => tracing::debug!(value, "ignoring malformed env directive"),
                    }
                }
            }
        }
        env
    }
}

/// Serialize entries back into session text: directives first, then one
/// command per line, with a trailing newline.
///
/// Together with [`Session::parse`] this round-trips the command sequence
/// exactly; directive whitespace is normalized.
pub fn serialize(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        if let Entry::Directive { key, value } = entry {
            out.push_str(DIRECTIVE_PREFIX);
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }
    for entry in entries {
        if let Entry::Command(command) = entry {
            out.push_str(command);
            out.push('\n');
        }
    }
    out
}
