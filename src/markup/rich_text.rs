use std::sync::LazyLock;

use regex::Regex;

/// Named highlight colors accepted by `[color]...[/color]`.
pub const PALETTE: [&str; 5] = ["yellow", "green", "blue", "red", "purple"];

static RE_BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*([^*<>]+?)\*\*\*").unwrap());
static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
// Italic content never spans a generated tag and never starts or ends with
// whitespace; `_` additionally needs a word boundary outside each marker.
static RE_ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s<>](?:[^*<>]*?[^*\s<>])?)\*").unwrap());
static RE_ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_\s<>](?:[^_<>]*?[^_\s<>])?)_\b").unwrap());
static RE_HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==(.+?)==").unwrap());
/// One pattern per palette color; the regex crate has no backreferences.
static RE_COLORS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PALETTE
        .iter()
        .map(|color| {
            let pattern = format!(r"\[{color}\](.+?)\[/{color}\]");
            (*color, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Convert lightweight markup into inline HTML.
///
/// Supported: `**bold**`, `*italic*`, `_italic_`, `==highlight==` and
/// `[color]...[/color]` for the [`PALETTE`]. Raw `&`, `<` and `>` are escaped
/// before any tag is generated, so only tags produced here survive.
///
/// Feed it source text exactly once: the output is not valid input.
pub fn render(source: &str) -> String {
    let escaped = escape(source);

    // Bold first so `**x**` is never half-eaten by the italic rule.
    let text = RE_BOLD_ITALIC.replace_all(&escaped, "<strong><em>$1</em></strong>");
    let text = RE_BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = RE_ITALIC_STAR.replace_all(&text, "<em>$1</em>");
    let text = RE_ITALIC_UNDERSCORE.replace_all(&text, "<em>$1</em>");
    let mut text = RE_HIGHLIGHT
        .replace_all(&text, r#"<mark class="hl-yellow">$1</mark>"#)
        .into_owned();

    for (color, re) in RE_COLORS.iter() {
        let replacement = format!(r#"<mark class="hl-{color}">${{1}}</mark>"#);
        text = re.replace_all(&text, replacement.as_str()).into_owned();
    }

    text
}

/// Escape the three characters that could open markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A stretch of rendered text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Palette color of an enclosing `<mark>`, innermost wins.
    pub mark: Option<String>,
}

/// Split the output of [`render`] back into styled runs of visible text.
///
/// Only the tags and entities [`render`] produces are understood; anything
/// else inside `<...>` is dropped.
pub fn runs(html: &str) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    let mut text = String::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut marks: Vec<String> = Vec::new();

    let mut rest = html;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                let Some(close) = rest.find('>') else {
                    text.push_str(rest);
                    break;
                };
                flush(&mut out, &mut text, bold, italic, &marks);
                let tag = &rest[1..close];
                match tag {
                    "strong" => bold += 1,
                    "/strong" => bold = bold.saturating_sub(1),
                    "em" => italic += 1,
                    "/em" => italic = italic.saturating_sub(1),
                    "/mark" => {
                        marks.pop();
                    }
                    _ => {
                        if let Some(color) = tag
                            .strip_prefix(r#"mark class="hl-"#)
                            .and_then(|rest| rest.strip_suffix('"'))
                        {
                            marks.push(color.to_string());
                        }
                    }
                }
                rest = &rest[close + 1..];
            }
            '&' => {
                let (decoded, len) = decode_entity(rest);
                text.push(decoded);
                rest = &rest[len..];
            }
            _ => {
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    flush(&mut out, &mut text, bold, italic, &marks);
    out
}

/// Visible text of rendered markup, with every tag removed.
pub fn visible_text(html: &str) -> String {
    runs(html).into_iter().map(|run| run.text).collect()
}

fn flush(out: &mut Vec<Run>, text: &mut String, bold: usize, italic: usize, marks: &[String]) {
    if text.is_empty() {
        return;
    }
    out.push(Run {
        text: std::mem::take(text),
        bold: bold > 0,
        italic: italic > 0,
        mark: marks.last().cloned(),
    });
}

fn decode_entity(input: &str) -> (char, usize) {
    for (entity, ch) in [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')] {
        if input.starts_with(entity) {
            return (ch, entity.len());
        }
    }
    ('&', 1)
}
