//! User-driven highlighting of rendered content.
//!
//! A content region (one explanation paragraph, say) carries a set of
//! character ranges the user has marked. Ranges are kept sorted, and
//! overlapping or touching ranges are merged.

use std::collections::HashMap;
use std::ops::Range;

/// Marked character ranges within a single region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    ranges: Vec<Range<usize>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `range` within a region of `region_len` characters.
    /// Empty or out-of-bounds ranges are rejected.
    pub fn add(&mut self, range: Range<usize>, region_len: usize) -> bool {
        if range.start >= range.end || range.end > region_len {
            return false;
        }

        let mut merged = range;
        self.ranges.retain(|existing| {
            let touches = existing.start <= merged.end && merged.start <= existing.end;
            if touches {
                merged.start = merged.start.min(existing.start);
                merged.end = merged.end.max(existing.end);
            }
            !touches
        });

        let at = self
            .ranges
            .partition_point(|existing| existing.start < merged.start);
        self.ranges.insert(at, merged);
        true
    }

    pub fn clear_all(&mut self) {
        self.ranges.clear();
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&offset))
    }

    /// Split `text` into `(segment, highlighted)` runs.
    pub fn segments<'t>(&self, text: &'t str) -> Vec<(&'t str, bool)> {
        let mut out = Vec::new();
        let mut run_start = 0;
        let mut run_marked = None;

        for (offset, (byte, _)) in text.char_indices().enumerate() {
            let marked = self.contains(offset);
            match run_marked {
                Some(current) if current != marked => {
                    out.push((&text[run_start..byte], current));
                    run_start = byte;
                    run_marked = Some(marked);
                }
                None => run_marked = Some(marked),
                _ => {}
            }
        }

        if let Some(marked) = run_marked {
            out.push((&text[run_start..], marked));
        }
        out
    }

    /// Wrap marked runs of plain `text` in `<mark class="hl-user">`,
    /// escaping everything else.
    pub fn apply_html(&self, text: &str) -> String {
        self.segments(text)
            .into_iter()
            .map(|(segment, marked)| {
                let escaped = super::escape(segment);
                if marked {
                    format!(r#"<mark class="hl-user">{escaped}</mark>"#)
                } else {
                    escaped
                }
            })
            .collect()
    }
}

/// Identifies a highlightable region: a question and one of its
/// explanation paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionId {
    pub question: String,
    pub paragraph: usize,
}

impl RegionId {
    pub fn new(question: impl Into<String>, paragraph: usize) -> Self {
        Self {
            question: question.into(),
            paragraph,
        }
    }
}

/// All highlights made on one quiz page.
#[derive(Debug, Clone, Default)]
pub struct HighlightLayer {
    regions: HashMap<RegionId, Annotations>,
}

impl HighlightLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, region: RegionId, range: Range<usize>, region_len: usize) -> bool {
        self.regions.entry(region).or_default().add(range, region_len)
    }

    pub fn get(&self, region: &RegionId) -> Option<&Annotations> {
        self.regions.get(region)
    }

    /// Remove every highlight on the page.
    pub fn clear_all(&mut self) {
        self.regions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.regions.values().all(Annotations::is_empty)
    }
}

/// Character ranges of the sentences in `text`. A sentence ends at `.`,
/// `!` or `?` followed by whitespace or the end of the text; leading
/// whitespace is not part of a sentence.
pub fn sentence_ranges(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut start = None;

    for (i, &ch) in chars.iter().enumerate() {
        if start.is_none() {
            if ch.is_whitespace() {
                continue;
            }
            start = Some(i);
        }

        let terminal = matches!(ch, '.' | '!' | '?');
        let boundary = chars.get(i + 1).is_none_or(|next| next.is_whitespace());
        if terminal && boundary {
            if let Some(s) = start.take() {
                out.push(s..i + 1);
            }
        }
    }

    if let Some(s) = start {
        let end = chars.len() - chars.iter().rev().take_while(|c| c.is_whitespace()).count();
        out.push(s..end);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_out_of_bounds_ranges() {
        let mut notes = Annotations::new();

        assert!(!notes.add(3..3, 10));
        assert!(!notes.add(5..11, 10));
        assert!(notes.is_empty());
    }

    #[test]
    fn merges_overlapping_and_adjacent_ranges() {
        let mut notes = Annotations::new();

        notes.add(10..15, 40);
        notes.add(0..3, 40);
        notes.add(12..20, 40);
        notes.add(3..5, 40);
        notes.add(30..35, 40);

        assert_eq!(notes.ranges(), &[0..5, 10..20, 30..35]);
    }

    #[test]
    fn a_wide_range_swallows_several() {
        let mut notes = Annotations::new();
        notes.add(1..2, 20);
        notes.add(4..6, 20);
        notes.add(8..9, 20);

        notes.add(0..10, 20);

        assert_eq!(notes.ranges(), &[0..10]);
    }

    #[test]
    fn segments_split_on_char_boundaries() {
        let mut notes = Annotations::new();
        notes.add(2..4, 6);

        assert_eq!(
            notes.segments("héllo!"),
            vec![("hé", false), ("ll", true), ("o!", false)]
        );
    }

    #[test]
    fn apply_html_escapes_and_marks() {
        let mut notes = Annotations::new();
        notes.add(0..5, 11);

        assert_eq!(
            notes.apply_html("a<b>c & d e"),
            r#"<mark class="hl-user">a&lt;b&gt;c</mark> &amp; d e"#
        );
    }

    #[test]
    fn clear_all_removes_everything() {
        let mut layer = HighlightLayer::new();
        layer.add(RegionId::new("q1", 0), 0..4, 10);
        layer.add(RegionId::new("q2", 1), 2..4, 10);
        assert!(!layer.is_empty());

        layer.clear_all();
        assert!(layer.is_empty());
    }

    #[test]
    fn sentence_ranges_skip_leading_space() {
        let text = "Stop the drug. Check B12!  Review in 2.5 weeks";

        let sentences: Vec<String> = sentence_ranges(text)
            .into_iter()
            .map(|r| text.chars().skip(r.start).take(r.len()).collect())
            .collect();

        assert_eq!(
            sentences,
            vec!["Stop the drug.", "Check B12!", "Review in 2.5 weeks"]
        );
    }

    #[test]
    fn sentence_ranges_of_blank_text_are_empty() {
        assert!(sentence_ranges("   ").is_empty());
        assert!(sentence_ranges("").is_empty());
    }
}
