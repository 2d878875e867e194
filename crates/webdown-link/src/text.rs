//! Text normalization for link and image syntax.

use std::borrow::Cow;

use webdown_core::marker::{is_line_break, is_space};

/// Wrap a link or image title in quotes.
///
/// Picks the quote character that needs no escaping: single quotes when the
/// title contains only double quotes, double quotes otherwise. A title with
/// both kinds gets double quotes with the inner double quotes escaped. An
/// empty title stays empty.
pub fn surround_with_matching_quote(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let has_double = content.contains('"');
    let has_single = content.contains('\'');

    match (has_double, has_single) {
        (true, true) => format!("\"{}\"", content.replace('"', "\\\"")),
        (true, false) => format!("'{content}'"),
        _ => format!("\"{content}\""),
    }
}

/// Backslash every `[` and `]` not already preceded by a backslash, so alt
/// text cannot close the `![...]` early.
pub fn escape_brackets_for_alt_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 4);
    let mut prev = None;

    for c in text.chars() {
        if matches!(c, '[' | ']') && prev != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        prev = Some(c);
    }

    escaped
}

/// Replace every run of three or more line breaks (`\n` or the hard line
/// break marker) with exactly two newlines.
///
/// Returns the input untouched, without allocating, when there is nothing
/// to collapse.
pub fn collapse_consecutive_newlines(content: &str) -> Cow<'_, str> {
    let mut collapsed: Option<String> = None;
    let mut kept_until = 0;
    let mut run_start = 0;
    let mut run_len = 0;
    let mut index = 0;

    loop {
        let next = content[index..].chars().next();

        if let Some(c) = next.filter(|&c| is_line_break(c)) {
            if run_len == 0 {
                run_start = index;
            }
            run_len += 1;
            index += c.len_utf8();
            continue;
        }

        if run_len > 2 {
            let out = collapsed.get_or_insert_with(|| String::with_capacity(content.len()));
            out.push_str(&content[kept_until..run_start]);
            out.push_str("\n\n");
            kept_until = index;
        }
        run_len = 0;

        match next {
            Some(c) => index += c.len_utf8(),
            None => break,
        }
    }

    match collapsed {
        None => Cow::Borrowed(content),
        Some(mut out) => {
            out.push_str(&content[kept_until..]);
            Cow::Owned(out)
        }
    }
}

/// Prepare possibly multi-line content for the inside of `[...]`.
///
/// Lines are trimmed and blank lines become a lone `\`, which keeps the
/// link text from being split into separate paragraphs.
pub fn escape_multiline_content(content: &str) -> String {
    let content = collapse_consecutive_newlines(content.trim());
    if content.is_empty() {
        return String::new();
    }

    content
        .split(is_line_break)
        .map(|line| match line.trim() {
            "" => "\\",
            line => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `content` into leading whitespace, core and trailing whitespace.
///
/// Line break markers count as whitespace. The three parts concatenate back
/// to `content`.
pub fn extract_surrounding_whitespace(content: &str) -> (&str, &str, &str) {
    let right_trimmed = content.trim_end_matches(is_space);
    let trailing = &content[right_trimmed.len()..];

    let core = right_trimmed.trim_start_matches(is_space);
    let leading = &right_trimmed[..right_trimmed.len() - core.len()];

    (leading, core, trailing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use webdown_core::marker::MARKER_LINE_BREAK;

    #[test]
    fn test_quote_empty() {
        assert_eq!(surround_with_matching_quote(""), "");
    }

    #[test]
    fn test_quote_plain_and_single() {
        assert_eq!(surround_with_matching_quote("Title"), "\"Title\"");
        assert_eq!(surround_with_matching_quote("it's"), "\"it's\"");
    }

    #[test]
    fn test_quote_double_only() {
        assert_eq!(surround_with_matching_quote(r#"He said "hi""#), r#"'He said "hi"'"#);
    }

    #[test]
    fn test_quote_both() {
        assert_eq!(
            surround_with_matching_quote(r#"it's "quoted""#),
            r#""it's \"quoted\"""#
        );
    }

    #[test]
    fn test_escape_alt_brackets() {
        assert_eq!(escape_brackets_for_alt_text("a[b]c"), r"a\[b\]c");
        assert_eq!(escape_brackets_for_alt_text(r"a\[b\]c"), r"a\[b\]c");
        assert_eq!(escape_brackets_for_alt_text("[[x]]"), r"\[\[x\]\]");
        assert_eq!(escape_brackets_for_alt_text("plain"), "plain");
    }

    #[test]
    fn test_collapse_runs() {
        assert_eq!(collapse_consecutive_newlines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_consecutive_newlines("a\n\n\nb\n\n\n\n\nc"), "a\n\nb\n\nc");
        assert_eq!(collapse_consecutive_newlines("\n\n\n"), "\n\n");
        assert_eq!(collapse_consecutive_newlines("a\n\n\n"), "a\n\n");
    }

    #[test]
    fn test_collapse_counts_markers() {
        let content = format!("a{MARKER_LINE_BREAK}\n{MARKER_LINE_BREAK}b");
        assert_eq!(collapse_consecutive_newlines(&content), "a\n\nb");

        let two = format!("a\n{MARKER_LINE_BREAK}b");
        assert_eq!(collapse_consecutive_newlines(&two), two);
    }

    #[test]
    fn test_collapse_short_runs_borrow() {
        let content = "über\n\nnaïve\nend";
        let result = collapse_consecutive_newlines(content);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, content);
    }

    #[test]
    fn test_collapse_keeps_multibyte() {
        assert_eq!(collapse_consecutive_newlines("日本\n\n\n語✓"), "日本\n\n語✓");
    }

    #[test]
    fn test_multiline_collapses_and_marks_blank_lines() {
        assert_eq!(escape_multiline_content("Line1\n\n\n\nLine2"), "Line1\n\\\nLine2");
        assert_eq!(escape_multiline_content("  one \n  two  "), "one\ntwo");
        assert_eq!(escape_multiline_content(" \n "), "");
    }

    #[test]
    fn test_multiline_splits_on_markers() {
        let content = format!("a{MARKER_LINE_BREAK}b");
        assert_eq!(escape_multiline_content(&content), "a\nb");
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(extract_surrounding_whitespace(" text "), (" ", "text", " "));
        assert_eq!(extract_surrounding_whitespace("\n\na b\t"), ("\n\n", "a b", "\t"));
        assert_eq!(extract_surrounding_whitespace("   "), ("", "", "   "));
        assert_eq!(extract_surrounding_whitespace(""), ("", "", ""));

        let content = format!("{MARKER_LINE_BREAK}x{MARKER_LINE_BREAK}");
        let (leading, core, trailing) = extract_surrounding_whitespace(&content);
        assert_eq!(core, "x");
        assert_eq!(leading.chars().next(), Some(MARKER_LINE_BREAK));
        assert_eq!(trailing.chars().next(), Some(MARKER_LINE_BREAK));
    }

    fn has_long_run(s: &str) -> bool {
        let mut run = 0;
        for c in s.chars() {
            run = if is_line_break(c) { run + 1 } else { 0 };
            if run > 2 {
                return true;
            }
        }
        false
    }

    proptest! {
        #[test]
        fn collapse_is_idempotent(s in "[ab é\n\u{E001}]{0,48}") {
            let once = collapse_consecutive_newlines(&s).into_owned();
            let twice = collapse_consecutive_newlines(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn collapse_never_grows(s in "[ab é\n\u{E001}]{0,48}") {
            prop_assert!(collapse_consecutive_newlines(&s).len() <= s.len());
        }

        #[test]
        fn collapse_without_long_runs_is_identity(s in "[ab é\n\u{E001}]{0,48}") {
            prop_assume!(!has_long_run(&s));
            let result = collapse_consecutive_newlines(&s);
            prop_assert!(matches!(result, Cow::Borrowed(_)));
            prop_assert_eq!(&*result, s.as_str());
        }

        #[test]
        fn surrounding_whitespace_reconstructs(s in "[ \t\nx✓\u{E001}]{0,32}") {
            let (leading, core, trailing) = extract_surrounding_whitespace(&s);
            prop_assert_eq!(format!("{leading}{core}{trailing}"), s.clone());
            prop_assert!(!core.starts_with(is_space));
            prop_assert!(!core.ends_with(is_space));
        }
    }
}
