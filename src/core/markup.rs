//! Lightweight message markup.
//!
//! Assistant replies (and user input) may carry three constructs and nothing
//! more:
//!
//! - `[label](url)`: a link that opens in a new browsing context
//! - `**text**`: emphasized text
//! - a newline: a line break
//!
//! Everything else is literal text. [`parse`] turns raw text into a small
//! inline tree that renderers walk; [`to_html`] is the HTML renderer, which
//! escapes every piece of text before wrapping it in the three allowed tags.

/// A parsed run of message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Link { label: Vec<Inline>, url: String },
    LineBreak,
}

/// Which constructs may open at the current nesting level. Links cannot nest
/// in links and bold cannot nest in bold, so each delimiter belongs to exactly
/// one construct.
#[derive(Clone, Copy)]
struct Allow {
    link: bool,
    strong: bool,
}

pub fn parse(text: &str) -> Vec<Inline> {
    parse_with(text, Allow { link: true, strong: true })
}

fn parse_with(text: &str, allow: Allow) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\n' {
            flush(&mut literal, &mut out);
            out.push(Inline::LineBreak);
            rest = &rest[1..];
            continue;
        }

        if allow.link
            && c == '['
            && let Some((label, url, consumed)) = match_link(rest)
        {
            flush(&mut literal, &mut out);
            out.push(Inline::Link {
                label: parse_with(label, Allow { link: false, ..allow }),
                url: url.to_string(),
            });
            rest = &rest[consumed..];
            continue;
        }

        if allow.strong
            && c == '*'
            && let Some((inner, consumed)) = match_strong(rest)
        {
            flush(&mut literal, &mut out);
            out.push(Inline::Strong(parse_with(inner, Allow { strong: false, ..allow })));
            rest = &rest[consumed..];
            continue;
        }

        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush(&mut literal, &mut out);
    out
}

fn flush(literal: &mut String, out: &mut Vec<Inline>) {
    if !literal.is_empty() {
        out.push(Inline::Text(std::mem::take(literal)));
    }
}

/// `[label](url)` at the start of `s`: non-empty label without `]`, non-empty
/// url without `)`. Returns the label, the url, and the bytes consumed.
fn match_link(s: &str) -> Option<(&str, &str, usize)> {
    let body = s.strip_prefix('[')?;
    let close = body.find(']')?;
    if close == 0 {
        return None;
    }
    let label = &body[..close];
    let after = body[close + 1..].strip_prefix('(')?;
    let end = after.find(')')?;
    if end == 0 {
        return None;
    }
    let url = &after[..end];
    // '[' + label + "](" + url + ')'
    let consumed = 1 + close + 2 + end + 1;
    Some((label, url, consumed))
}

/// `**text**` at the start of `s`, text non-empty and free of `*`.
fn match_strong(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix("**")?;
    let end = body.find('*')?;
    if end == 0 || !body[end..].starts_with("**") {
        return None;
    }
    Some((&body[..end], 2 + end + 2))
}

/// Flattens inlines back to plain text (labels only, no urls). Used for
/// renderers that cannot show markup, such as log lines and previews.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(children) => out.push_str(&plain_text(children)),
            Inline::Link { label, .. } => out.push_str(&plain_text(label)),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

/// Single-line plain rendering of raw message text for log lines, cut to
/// `max_chars` characters with a trailing `…`.
pub fn log_preview(text: &str, max_chars: usize) -> String {
    let flat = plain_text(&parse(text)).replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

// ── HTML ────────────────────────────────────────────────────────────────────

/// Renders raw message text as an HTML fragment.
pub fn to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    write_html(&parse(text), &mut out);
    out
}

/// Renders already-parsed inlines as an HTML fragment.
pub fn inlines_to_html(inlines: &[Inline]) -> String {
    let mut out = String::new();
    write_html(inlines, &mut out);
    out
}

fn write_html(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => escape_into(text, out),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_html(children, out);
                out.push_str("</strong>");
            }
            Inline::Link { label, url } if is_safe_url(url) => {
                out.push_str("<a href=\"");
                escape_into(url.trim(), out);
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                write_html(label, out);
                out.push_str("</a>");
            }
            Inline::Link { label, .. } => write_html(label, out),
            Inline::LineBreak => out.push_str("<br>"),
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Relative urls and http(s)/mailto only; `javascript:` and friends are dropped.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    let scheme_end = url.find(':');
    let path_start = url.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        // No scheme, or the first ':' sits after the path starts: relative.
        (None, _) => true,
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = url[..colon].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
    }
}
