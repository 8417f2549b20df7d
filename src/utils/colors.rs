/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey "--" for a missing value, the value itself otherwise.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => format!("{GREY}--{RESET}"),
    }
}

/// Counter color: green when positive, grey when zero.
pub fn color_for_count(value: usize) -> &'static str {
    if value > 0 { GREEN } else { GREY }
}

/// Problem counter color: red when positive, grey when zero.
pub fn color_for_problems(value: usize) -> &'static str {
    if value > 0 { RED } else { GREY }
}
