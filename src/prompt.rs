//! Prompt templates, built-in themes, and ANSI styling.
//!
//! A theme is a template string with `{token}` placeholders; a token may
//! carry style suffixes applied in order, e.g. `{cwd.cyan.bold}`. Rendering
//! is a pure function of the template and the supplied context. Unknown
//! tokens render as the empty string so prompts survive theme drift.

use std::path::Path;

const ANSI_RESET: &str = "\x1b[0m";

/// Fixed set of styles a theme may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Bold,
    Dim,
    Underline,
}

impl StyleName {
    fn parse(name: &str) -> Option<StyleName> {
        Some(match name {
            "black" => StyleName::Black,
            "red" => StyleName::Red,
            "green" => StyleName::Green,
            "yellow" => StyleName::Yellow,
            "blue" => StyleName::Blue,
            "magenta" => StyleName::Magenta,
            "cyan" => StyleName::Cyan,
            "white" => StyleName::White,
            "bold" => StyleName::Bold,
            "dim" => StyleName::Dim,
            "underline" => StyleName::Underline,
            _ => return None,
        })
    }

    fn code(self) -> &'static str {
        match self {
            StyleName::Black => "\x1b[30m",
            StyleName::Red => "\x1b[31m",
            StyleName::Green => "\x1b[32m",
            StyleName::Yellow => "\x1b[33m",
            StyleName::Blue => "\x1b[34m",
            StyleName::Magenta => "\x1b[35m",
            StyleName::Cyan => "\x1b[36m",
            StyleName::White => "\x1b[37m",
            StyleName::Bold => "\x1b[1m",
            StyleName::Dim => "\x1b[2m",
            StyleName::Underline => "\x1b[4m",
        }
    }
}

/// Wrap `text` in the ANSI codes for one style. Styles compose by ordered
/// application: `paint(paint(t, Cyan), Bold)`.
pub fn paint(text: &str, style: StyleName) -> String {
    format!("{}{}{}", style.code(), text, ANSI_RESET)
}

/// A named prompt template.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub template: &'static str,
}

/// Built-in themes, ported from the usual suspects of shell prompt design.
pub const THEMES: &[Theme] = &[
    Theme {
        name: "default",
        template: "{user.cyan.bold}@{host.blue}:{dir.green} $ ",
    },
    Theme {
        name: "bare",
        template: "$ ",
    },
    Theme {
        name: "sorin",
        template: "{cwd.cyan} ❯ ",
    },
    Theme {
        name: "nicolauj",
        template: "{cwd.blue} › ",
    },
    Theme {
        name: "redhat",
        template: "[{user}@{host} {dir}]$ ",
    },
    Theme {
        name: "walters",
        template: "{user}@{host.red}:{cwd.blue}$ ",
    },
];

/// Look up a built-in theme by name.
pub fn lookup(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

/// State a template may reference.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub user: &'a str,
    pub host: &'a str,
    pub cwd: &'a Path,
    pub shell: &'a str,
}

/// Render a prompt template against the given context.
pub fn render(template: &str, ctx: &PromptContext) -> String {
    let mut out = String::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                out.push_str(&render_token(&after_open[..close], ctx));
                rest = &after_open[close + 1..];
            }
            None => {
                // Unbalanced brace: emit literally.
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_token(token: &str, ctx: &PromptContext) -> String {
    let mut parts = token.split('.');
    let name = parts.next().unwrap_or_default();
    let value = match name {
        "user" => ctx.user.to_string(),
        "host" => ctx.host.to_string(),
        "cwd" => display_cwd(ctx.cwd),
        "dir" => basename(ctx.cwd),
        "shell" => ctx.shell.to_string(),
        _ => return String::new(),
    };
    // Unknown style names are skipped rather than failing the render.
    parts
        .filter_map(StyleName::parse)
        .fold(value, |text, style| paint(&text, style))
}

/// Current directory for display, with the home prefix shortened to `~`.
fn display_cwd(cwd: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = cwd.strip_prefix(&home) {
            return if rest.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", rest.display())
            };
        }
    }
    cwd.display().to_string()
}

fn basename(cwd: &Path) -> String {
    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string())
}
