use crate::cli::ColorChoice;
use std::io::IsTerminal;

/// Apply `--color` to every `colored` string printed afterwards
pub fn init(choice: ColorChoice) {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    colored::control::set_override(enabled(choice, no_color, std::io::stdout().is_terminal()));
}

// NO_COLOR (https://no-color.org/) only affects auto detection
fn enabled(choice: ColorChoice, no_color: bool, terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => terminal && !no_color,
    }
}
