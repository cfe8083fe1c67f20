//! Reading-order line reconstruction from positioned fragments.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::pdf::TextFragment;

/// Sentinel line inserted after each page so recognizers never pair a
/// label with a value across a page boundary.
pub const PAGE_BREAK: &str = "\u{000C}";

/// Rebuild visual text rows from unordered positioned fragments.
///
/// Fragments sharing a rounded baseline `y` belong to one row; rounding
/// absorbs sub-pixel baseline jitter. Rows are emitted visually top to
/// bottom (descending `y`, bottom-left origin) and fragments within a row
/// left to right, joined with single spaces. Every page is terminated with
/// [`PAGE_BREAK`]; pages without fragments contribute no text rows.
///
/// The result is deterministic for any permutation of each page's
/// fragment list.
pub fn reconstruct_lines(pages: &[Vec<TextFragment>]) -> Vec<String> {
    let mut lines = Vec::new();

    for page in pages {
        let mut rows: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();
        for fragment in page {
            rows.entry(fragment.y.round() as i64)
                .or_default()
                .push(fragment);
        }

        // BTreeMap iterates ascending by y; the visual top of the page is
        // the largest y.
        for (_, mut row) in rows.into_iter().rev() {
            row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
            let text = row
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(text);
        }

        lines.push(PAGE_BREAK.to_string());
    }

    lines
}
