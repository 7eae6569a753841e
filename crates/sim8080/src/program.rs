use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Program used when none is given: MVI B,01 / INR B / CPI 64 / JNZ 0002 / HLT.
///
/// A is never written, so the compare never yields zero and the loop does not
/// reach HLT on its own.
pub const DEFAULT_PROGRAM: &str = "06 01 04 FE 64 C2 02 00 76";

/// Parse whitespace-separated hexadecimal bytes, e.g. `"06 01 04 FE"`.
///
/// Tokens are case-insensitive and may carry a `0x` prefix.
pub fn parse_hex_program(text: &str) -> Result<Vec<u8>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            u8::from_str_radix(digits, 16)
                .with_context(|| format!("invalid byte '{}' at position {}", token, i + 1))
        })
        .collect()
}

/// Resolve a program argument: an existing file is read and parsed, anything
/// else is parsed as inline hex text.
pub fn load_program_source(arg: &str) -> Result<Vec<u8>> {
    let path = Path::new(arg);
    if path.is_file() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read program file '{}'", path.display()))?;
        log::info!("Loading program file '{}'", path.display());
        parse_hex_program(&text).with_context(|| format!("in program file '{}'", path.display()))
    } else {
        parse_hex_program(arg)
    }
}
