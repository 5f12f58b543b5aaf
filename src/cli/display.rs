// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! ANSI color helpers for terminal output, gated on stdout being a TTY so
//! piped output stays clean.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const CYAN: &str = "\x1b[36m";
pub const YELLOW: &str = "\x1b[33m";

/// Wrap `text` in `code` when stdout is a terminal.
pub fn styled(code: &str, text: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}
