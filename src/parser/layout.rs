//! Layout analysis: groups positioned spans into lines and blocks.

use std::cmp::Ordering;

use super::content::PositionedSpan;
use crate::model::{Block, Line};

/// Fraction of the font size two baselines may differ by and still share a line.
const BASELINE_TOLERANCE: f32 = 0.3;

/// A line under construction.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Baseline of the first span
    pub y: f32,
    /// Spans sorted left to right
    pub spans: Vec<PositionedSpan>,
}

impl TextLine {
    fn new(span: PositionedSpan) -> Self {
        Self {
            y: span.y,
            spans: vec![span],
        }
    }

    fn accepts(&self, span: &PositionedSpan) -> bool {
        let tolerance = span.span.size.max(1.0) * BASELINE_TOLERANCE;
        (span.y - self.y).abs() <= tolerance
    }

    fn into_line(mut self) -> Line {
        self.spans
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        Line::new(self.spans.into_iter().map(|p| p.span).collect())
    }
}

/// Groups spans into lines by baseline, and lines into blocks by vertical gap.
#[derive(Debug, Clone, Copy)]
pub struct LayoutAnalyzer {
    block_gap_factor: f32,
}

impl LayoutAnalyzer {
    /// Create an analyzer splitting blocks at gaps wider than
    /// `block_gap_factor` × the median line spacing.
    pub fn new(block_gap_factor: f32) -> Self {
        Self { block_gap_factor }
    }

    /// Build the text blocks of one page.
    pub fn blocks(&self, spans: Vec<PositionedSpan>) -> Vec<Block> {
        let lines = self.group_spans_into_lines(spans);
        self.group_lines_into_blocks(lines)
    }

    /// Sort spans top to bottom and group those sharing a baseline.
    pub fn group_spans_into_lines(&self, mut spans: Vec<PositionedSpan>) -> Vec<TextLine> {
        // PDF y grows upwards; stable sort keeps content order on ties
        spans.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));

        let mut lines: Vec<TextLine> = Vec::new();
        for span in spans {
            match lines.last_mut() {
                Some(line) if line.accepts(&span) => line.spans.push(span),
                _ => lines.push(TextLine::new(span)),
            }
        }
        lines
    }

    /// Split lines into blocks at unusually wide vertical gaps.
    pub fn group_lines_into_blocks(&self, lines: Vec<TextLine>) -> Vec<Block> {
        if lines.is_empty() {
            return Vec::new();
        }

        let gaps: Vec<f32> = lines.windows(2).map(|w| w[0].y - w[1].y).collect();
        let threshold = median(&gaps).map(|m| m * self.block_gap_factor);

        let mut blocks = Vec::new();
        let mut current: Vec<Line> = Vec::new();
        let mut gaps = gaps.into_iter();

        for (index, line) in lines.into_iter().enumerate() {
            if index > 0 {
                let gap = gaps.next().unwrap_or(0.0);
                if threshold.is_some_and(|t| gap > t) && !current.is_empty() {
                    blocks.push(Block::text(std::mem::take(&mut current)));
                }
            }
            current.push(line.into_line());
        }
        if !current.is_empty() {
            blocks.push(Block::text(current));
        }

        log::trace!("{} block(s) from layout", blocks.len());
        blocks
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new(super::options::DEFAULT_BLOCK_GAP_FACTOR)
    }
}

/// Median of the strictly positive values.
fn median(values: &[f32]) -> Option<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;

    fn at(text: &str, size: f32, x: f32, y: f32) -> PositionedSpan {
        PositionedSpan {
            span: Span::new(text, size, "Helvetica"),
            x,
            y,
            width: 0.0,
        }
    }

    #[test]
    fn test_spans_grouped_by_baseline() {
        let analyzer = LayoutAnalyzer::default();
        let lines = analyzer.group_spans_into_lines(vec![
            at("world", 12.0, 120.0, 700.0),
            at("Hello ", 12.0, 72.0, 700.5),
            at("Next", 12.0, 72.0, 686.0),
        ]);

        assert_eq!(lines.len(), 2);
        let first = lines[0].clone().into_line();
        assert_eq!(first.text(), "Hello world");
    }

    #[test]
    fn test_blocks_split_on_wide_gap() {
        let analyzer = LayoutAnalyzer::default();
        let blocks = analyzer.blocks(vec![
            at("Title", 18.0, 72.0, 750.0),
            at("line one", 12.0, 72.0, 700.0),
            at("line two", 12.0, 72.0, 686.0),
            at("line three", 12.0, 72.0, 672.0),
            at("line four", 12.0, 72.0, 658.0),
            at("next para", 12.0, 72.0, 610.0),
        ]);

        let shape: Vec<usize> = blocks.iter().map(|b| b.lines.len()).collect();
        assert_eq!(shape, vec![1, 4, 1]);
    }

    #[test]
    fn test_even_spacing_is_one_block() {
        let analyzer = LayoutAnalyzer::new(1.5);
        let blocks = analyzer.blocks(vec![
            at("a", 12.0, 72.0, 700.0),
            at("b", 12.0, 72.0, 686.0),
            at("c", 12.0, 72.0, 672.0),
        ]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].span_count(), 3);
    }

    #[test]
    fn test_empty_page_has_no_blocks() {
        assert!(LayoutAnalyzer::default().blocks(Vec::new()).is_empty());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[0.0]), None);
    }
}
