/// Truncate a string to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Strip markdown code blocks from a response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Extract the first balanced `{…}` object from free text.
///
/// Models routinely wrap JSON in prose or fences despite instructions, so
/// this scans for the first `{` and walks forward tracking brace depth,
/// string state, and escapes. Returns `None` when no balanced object exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Each character below is multibyte, so byte-based clipping would
        // keep fewer than `max_chars` of them.
        let text = "⚽".repeat(8);
        let truncated = truncate_chars(&text, 5);
        assert_eq!(truncated.chars().count(), 5);
        assert_eq!(truncated, "⚽".repeat(5));
    }

    #[test]
    fn test_truncate_within_bounds() {
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_from_prose() {
        let noisy = r#"Sure! Here is the JSON you asked for: {"name": "Messi"} Hope that helps."#;
        assert_eq!(extract_json_object(noisy), Some(r#"{"name": "Messi"}"#));
    }

    #[test]
    fn test_extract_nested_object() {
        let text = r#"{"stats": {"goals": 800}, "name": "x"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_braces_inside_strings() {
        let text = r#"{"analysis": "tactics {4-3-3} and a \" quote"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_no_object() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("unbalanced { forever"), None);
    }
}
