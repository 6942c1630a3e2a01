//! Plain-text to markup conversion for transcript bubbles.
//!
//! Input is always treated as text: HTML-significant characters are escaped
//! before anything else, so markup produced here is limited to `<br>`,
//! `<strong>` and `<em>`. Emphasis is a two-pass, non-greedy substitution
//! (bold first, then italic) with no support for escaped delimiters.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Escape, convert newlines, then apply bold and italic spans.
pub fn format_message(text: &str) -> String {
    let mut formatted = escape_html(text).replace('\n', "<br>");
    formatted = wrap_delimited(&formatted, "**", "strong");
    formatted = wrap_delimited(&formatted, "__", "strong");
    formatted = wrap_delimited(&formatted, "*", "em");
    wrap_delimited(&formatted, "_", "em")
}

/// Bubble body markup: bold speaker label followed by the formatted text.
pub fn labeled_message_html(label: &str, text: &str) -> String {
    format!("<strong>{}:</strong> {}", escape_html(label), format_message(text))
}

/// Escape characters that would otherwise be interpreted as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace every `{delim}x{delim}` span with `<tag>x</tag>`.
///
/// Scans left to right. At each opening delimiter the shortest non-empty
/// body up to the next delimiter wins; a body may not contain a line
/// terminator. Unmatched delimiters are kept as-is.
fn wrap_delimited(input: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find(delim) {
        let body_start = open + delim.len();
        let Some(first) = rest[body_start..].chars().next() else {
            break;
        };
        let search_from = body_start + first.len_utf8();

        let close = rest[search_from..]
            .find(delim)
            .map(|offset| search_from + offset)
            .filter(|&close| !rest[body_start..close].contains(is_line_terminator));

        match close {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push('<');
                out.push_str(tag);
                out.push('>');
                out.push_str(&rest[body_start..close]);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                rest = &rest[close + delim.len()..];
            }
            None => {
                // No span opens here; keep the first delimiter character and rescan.
                let step = open + delim.chars().next().map_or(1, char::len_utf8);
                out.push_str(&rest[..step]);
                rest = &rest[step..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
