//! Markup-bearing text as styled ratatui spans.

use std::ops::Range;

use ratatui::prelude::*;

use crate::markup::{self, Annotations, Run};

/// Background for text the user has highlighted.
const USER_HIGHLIGHT: Color = Color::LightCyan;

pub fn mark_color(name: &str) -> Color {
    match name {
        "green" => Color::Green,
        "blue" => Color::Blue,
        "red" => Color::Red,
        "purple" => Color::Magenta,
        _ => Color::Yellow,
    }
}

fn run_style(run: &Run, base: Style) -> Style {
    let mut style = base;
    if run.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if run.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if let Some(color) = &run.mark {
        style = style.bg(mark_color(color)).fg(Color::Black);
    }
    style
}

/// Render markup `source` into spans on top of `base`.
pub fn spans(source: &str, base: Style) -> Vec<Span<'static>> {
    markup::runs(&markup::render(source))
        .into_iter()
        .map(|run| {
            let style = run_style(&run, base);
            Span::styled(run.text, style)
        })
        .collect()
}

pub fn line(source: &str, base: Style) -> Line<'static> {
    Line::from(spans(source, base))
}

/// Like [`spans`], additionally painting user highlights and underlining
/// the character range under the highlight cursor.
pub fn annotated_spans(
    source: &str,
    base: Style,
    annotations: Option<&Annotations>,
    cursor: Option<Range<usize>>,
) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut offset = 0;

    for run in markup::runs(&markup::render(source)) {
        let style = run_style(&run, base);
        let mut buffer = String::new();
        let mut buffer_style: Option<Style> = None;

        for ch in run.text.chars() {
            let mut char_style = style;
            if annotations.is_some_and(|a| a.contains(offset)) {
                char_style = char_style.bg(USER_HIGHLIGHT).fg(Color::Black);
            }
            if cursor.as_ref().is_some_and(|r| r.contains(&offset)) {
                char_style = char_style.add_modifier(Modifier::UNDERLINED);
            }

            if let Some(previous) = buffer_style {
                if previous != char_style {
                    out.push(Span::styled(std::mem::take(&mut buffer), previous));
                }
            }
            buffer_style = Some(char_style);
            buffer.push(ch);
            offset += 1;
        }

        if let Some(previous) = buffer_style {
            out.push(Span::styled(buffer, previous));
        }
    }

    out
}
