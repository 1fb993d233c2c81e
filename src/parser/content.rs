//! Content stream interpretation: turns text-showing operators into
//! positioned spans.

use super::backend::{decode_text, ContentOp, FontMap, PdfValue};
use crate::model::{flags_from_font_name, Span};

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Rough glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A span together with its position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    /// The span
    pub span: Span,
    /// X position (left edge) in user space
    pub x: f32,
    /// Baseline Y position in user space (PDF coordinates, bottom-up)
    pub y: f32,
    /// Estimated width
    pub width: f32,
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn translated(&self, tx: f32, ty: f32) -> Self {
        Self {
            e: self.e + tx * self.a + ty * self.c,
            f: self.f + tx * self.b + ty * self.d,
            ..*self
        }
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Length of the transformed vertical unit vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// Graphics state that survives `q`/`Q`.
#[derive(Debug, Clone, Copy, Default)]
struct GraphicsState {
    fill_color: u32,
}

/// Interpreter state for one page.
#[derive(Debug)]
pub struct ContentInterpreter<'a> {
    fonts: &'a FontMap,
    font_resource: Vec<u8>,
    font_size: f32,
    leading: f32,
    text_matrix: TextMatrix,
    line_matrix: TextMatrix,
    in_text: bool,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    spans: Vec<PositionedSpan>,
}

impl<'a> ContentInterpreter<'a> {
    /// Create an interpreter resolving font resources through `fonts`.
    pub fn new(fonts: &'a FontMap) -> Self {
        Self {
            fonts,
            font_resource: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            text_matrix: TextMatrix::default(),
            line_matrix: TextMatrix::default(),
            in_text: false,
            state: GraphicsState::default(),
            saved: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Run every operation and return the shown spans in content order.
    pub fn run(mut self, ops: &[ContentOp]) -> Vec<PositionedSpan> {
        for op in ops {
            self.apply(op);
        }
        self.spans
    }

    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.saved.push(self.state),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = TextMatrix::default();
                self.line_matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.font_resource = name.clone();
                }
                match op.number(1) {
                    Some(size) => self.font_size = size,
                    None => log::trace!("Tf without a numeric size"),
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                let values: Vec<f32> = op.operands.iter().filter_map(PdfValue::as_number).collect();
                if let [a, b, c, d, e, f] = values[..] {
                    self.line_matrix = TextMatrix { a, b, c, d, e, f };
                    self.text_matrix = self.line_matrix;
                } else {
                    log::trace!("Tm with {} numeric operand(s)", values.len());
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "g" => {
                if let Some(gray) = op.number(0) {
                    self.state.fill_color = rgb_to_int(gray, gray, gray);
                }
            }
            "rg" => {
                if let (Some(r), Some(g), Some(b)) = (op.number(0), op.number(1), op.number(2)) {
                    self.state.fill_color = rgb_to_int(r, g, b);
                }
            }
            "k" => {
                if let (Some(c), Some(m), Some(y), Some(k)) =
                    (op.number(0), op.number(1), op.number(2), op.number(3))
                {
                    self.state.fill_color =
                        rgb_to_int((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k));
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = self.line_matrix.translated(tx, ty);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Without TL, fall back to the font size as leading
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size
        };
        self.move_line(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        decode_text(self.fonts.get(&self.font_resource), bytes)
    }

    /// Decode a TJ array, turning wide negative adjustments into spaces.
    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -item.as_number().unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        if !self.in_text {
            log::trace!("text shown outside BT/ET ignored");
            return;
        }
        if text.is_empty() {
            return;
        }

        let (x, y) = self.text_matrix.position();
        let size = self.font_size.abs() * self.text_matrix.vertical_scale();
        let width = text.chars().count() as f32
            * self.font_size.abs()
            * AVG_GLYPH_WIDTH
            * self.text_matrix.horizontal_scale();

        let font = self
            .fonts
            .get(&self.font_resource)
            .map(|f| f.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(&self.font_resource).to_string());
        let flags = flags_from_font_name(&font);

        self.spans.push(PositionedSpan {
            span: Span::new(text, size, font)
                .with_flags(flags)
                .with_color(self.state.fill_color),
            x,
            y,
            width,
        });

        // Advance along the baseline so later spans sort after this one
        let advance = width / self.text_matrix.horizontal_scale().max(f32::EPSILON);
        self.text_matrix = self.text_matrix.translated(advance, 0.0);
    }
}

/// Convert colour components in `0.0..=1.0` to an sRGB integer.
fn rgb_to_int(r: f32, g: f32, b: f32) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Interpret a page's operations against its fonts.
pub fn extract_spans(ops: &[ContentOp], fonts: &FontMap) -> Vec<PositionedSpan> {
    ContentInterpreter::new(fonts).run(ops)
}
