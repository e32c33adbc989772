//! String helpers shared by the pipeline.

/// Number of Unicode scalar values in `s` after trimming surrounding whitespace.
///
/// Thresholds on user-visible text are measured in characters, never bytes,
/// so a Hindi or Japanese snippet is judged by the same yardstick as English.
pub fn trimmed_char_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Single-line preview for log messages: whitespace runs collapse to one
/// space and the result is cut to `max_chars` characters with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
