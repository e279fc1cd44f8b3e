//! Utility functions and constants for HTML processing.

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "details", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frameset", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "html", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Repeat a string n times
pub fn repeat(s: &str, n: usize) -> String {
    s.repeat(n)
}

/// Collapse HTML whitespace runs to single spaces
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Strip outer newlines and collapse runs of three or more newlines to a
/// single blank line
pub fn normalize_blank_lines(s: &str) -> String {
    let result = s.trim_matches('\n');

    let mut newline_count = 0;
    let mut processed = String::with_capacity(result.len());
    for c in result.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                processed.push(c);
            }
        } else {
            newline_count = 0;
            processed.push(c);
        }
    }

    processed
}

/// Escape Markdown-significant characters in literal text
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '#' | '+' | '-' | '!' | '`' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}
