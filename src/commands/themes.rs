//! `themes` subcommand handler.

use std::path::Path;

use livedemo::prompt::{self, PromptContext};

pub fn handle(preview: bool) {
    let ctx = PromptContext {
        user: "demo",
        host: "local",
        cwd: Path::new("/home/demo/project"),
        shell: "bash",
    };
    for theme in prompt::THEMES {
        if preview {
            println!("{:<10} {}", theme.name, prompt::render(theme.template, &ctx));
        } else {
            println!("{}", theme.name);
        }
    }
}
