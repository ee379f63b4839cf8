//! Text form of the preference file.
//!
//! One association per line, `mime_type=program`, no header and no escaping.
//! Parsing never fails: lines that do not yield a non-empty key and value are
//! skipped and the rest of the file is still read.

use tracing::trace;
use types::Association;

/// Separator between the MIME type and the program on a line.
pub const SEPARATOR: char = '=';

/// Parse the full file text into associations, in file order.
///
/// Each line is split once on the first `=`; both halves are trimmed. Lines
/// without `=`, or with an empty key or value after trimming, are skipped.
pub fn parse(text: &str) -> Vec<Association> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                trace!(line = index + 1, "skipping malformed preference line");
            }
            parsed
        })
        .collect()
}

/// Parse raw file bytes, skipping lines that are not valid UTF-8.
///
/// Lines are split on `\n` before decoding, so one undecodable line never
/// hides the lines around it.
pub fn parse_bytes(bytes: &[u8]) -> Vec<Association> {
    bytes
        .split(|&byte| byte == b'\n')
        .enumerate()
        .filter_map(|(index, raw)| match std::str::from_utf8(raw) {
            Ok(line) => {
                let parsed = parse_line(line);
                if parsed.is_none() && !line.trim().is_empty() {
                    trace!(line = index + 1, "skipping malformed preference line");
                }
                parsed
            }
            Err(_) => {
                trace!(line = index + 1, "skipping preference line that is not valid UTF-8");
                None
            }
        })
        .collect()
}

/// Parse a single line, returning `None` for anything that is not a valid entry.
pub fn parse_line(line: &str) -> Option<Association> {
    let (key, value) = line.split_once(SEPARATOR)?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some(Association::new(key, value))
}

/// Serialize associations as `mime_type=program\n` lines, in order.
///
/// Fields are written verbatim; a field containing `=` or a newline will not
/// read back the same.
pub fn serialize(entries: &[Association]) -> String {
    let capacity = entries.iter().map(|e| e.mime_type.len() + e.program.len() + 2).sum();
    entries.iter().fold(String::with_capacity(capacity), |mut text, entry| {
        text.push_str(&entry.mime_type);
        text.push(SEPARATOR);
        text.push_str(&entry.program);
        text.push('\n');
        text
    })
}
