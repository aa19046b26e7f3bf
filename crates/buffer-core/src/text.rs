pub(crate) fn split_lines_preserve_trailing(text: &str) -> Vec<String> {
    // N newlines => N+1 lines, so a trailing newline yields a trailing empty line.
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Returns `true` for characters that delimit words for cursor word-jumps.
pub(crate) fn is_word_break(ch: char) -> bool {
    ch.is_whitespace()
}
