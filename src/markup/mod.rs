//! Text transforms for question stems, explanations and reference pages.

mod annotate;
mod rich_text;

pub use annotate::{Annotations, HighlightLayer, RegionId, sentence_ranges};
pub use rich_text::{PALETTE, Run, escape, render, runs, visible_text};
