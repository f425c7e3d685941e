//! SVG text driver for one page.
//!
//! The host interpreter walks the content stream and calls the positioning
//! operators ([`SvgText::set_matrix`], [`SvgText::move_to`],
//! [`SvgText::next_line`]) and [`SvgText::show`] in stream order. Every string
//! shown becomes one `<g><text>..</text></g>` fragment written straight to the
//! sink.
//!
//! Pen coordinates live in text space with y growing downwards: `move_to`
//! subtracts its `dy` and `next_line` adds the leading, while the emitted
//! transform negates the matrix's `c` and `d` terms.
//! Pen arithmetic saturates at the bounds of [`Decimal`] instead of failing,
//! so absurd operands only misplace text.

use std::io::Write;

use lopdf::Document;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::OutputError;
use crate::fonts::{FontCache, WIDTH_DENSITY, WidthTable};
use crate::output::{TextRun, write_text_run};
use crate::styles::{DEFAULT_FONT_STYLE, FontStyleTable};
use crate::types::{DrawingContext, PenState, ShowElement, TextMatrix};

/// `TJ` adjustments are in thousandths of a text space unit.
const ADJUST_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

pub struct SvgText<'a, W> {
    fonts: FontCache<'a>,
    styles: &'a FontStyleTable,
    out: W,
    matrix: TextMatrix,
    pen: PenState,
}

impl<'a, W: Write> SvgText<'a, W> {
    /// Creates a driver for page `page` (1-based) of `doc`.
    pub fn new(doc: &'a Document, page: u32, styles: &'a FontStyleTable, out: W) -> Self {
        let mut t = SvgText {
            fonts: FontCache::new(doc, page),
            styles,
            out,
            matrix: TextMatrix::IDENTITY,
            pen: PenState::default(),
        };
        t.set_matrix(None);
        t
    }

    pub fn matrix(&self) -> &TextMatrix {
        &self.matrix
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `Tm`, and `BT` with no values: replaces the matrix and puts the pen
    /// back at the origin.
    pub fn set_matrix(&mut self, values: Option<[Decimal; 6]>) {
        self.matrix = values.map_or(TextMatrix::IDENTITY, TextMatrix::new);
        self.pen = PenState::default();
    }

    /// `Td`: starts a new line offset from the start of the current one.
    pub fn move_to(&mut self, dx: Decimal, dy: Decimal) {
        self.pen.line_x = self.pen.line_x.saturating_add(dx);
        self.pen.x = self.pen.line_x;
        self.pen.y = self.pen.y.saturating_sub(dy);
    }

    /// `T*`: starts a new line one leading further down.
    pub fn next_line(&mut self, ctx: &DrawingContext) {
        self.pen.x = self.pen.line_x;
        self.pen.y = self.pen.y.saturating_add(ctx.leading);
    }

    /// Advance widths of a font resource on this page.
    pub fn widths(&mut self, font: &str) -> &WidthTable {
        self.fonts.widths(font)
    }

    /// CSS style for a font resource on this page.
    pub fn style(&mut self, font: &str) -> &'a str {
        let styles = self.styles;
        match self.fonts.font_name(font) {
            Some(name) => styles.resolve_style(&name),
            None => DEFAULT_FONT_STYLE,
        }
    }

    /// Decodes a string in the current font and sums its advance in
    /// 1/[`WIDTH_DENSITY`] glyph space units.
    fn glyph_advance(&mut self, font: &str, bytes: &[u8]) -> (String, i64) {
        let w = self.fonts.widths(font);
        let width = bytes
            .iter()
            .fold(0i64, |sum, &b| sum.saturating_add(w[b as usize]));
        (self.fonts.char_map(font).decode(bytes), width)
    }

    /// Decodes a string and returns its advance in text space, scaled by the
    /// current font size.
    pub fn advance(&mut self, ctx: &DrawingContext, bytes: &[u8]) -> (String, Decimal) {
        let (text, width) = self.glyph_advance(&ctx.font, bytes);
        let adv = ctx
            .font_size
            .saturating_mul(Decimal::from(width) / Decimal::from(WIDTH_DENSITY));
        (text, adv)
    }

    /// `TJ` / `Tj`: writes one fragment per string and moves the pen past it.
    /// Numeric elements move the pen left by 1/1000 of their value,
    /// independent of font size.
    pub fn show(&mut self, ctx: &DrawingContext, run: &[ShowElement]) -> Result<(), OutputError> {
        for element in run {
            match element {
                ShowElement::Text(bytes) => {
                    let (text, adv) = self.advance(ctx, bytes);
                    let style = self.style(&ctx.font);
                    debug!(
                        "show {:?} at ({}, {}) advance {}",
                        text, self.pen.x, self.pen.y, adv
                    );
                    write_text_run(
                        &mut self.out,
                        &TextRun {
                            transform: self.matrix.flipped(),
                            x: self.pen.x,
                            y: self.pen.y,
                            font_size: ctx.font_size,
                            style,
                            fill: &ctx.fill_color,
                            text: &text,
                        },
                    )?;
                    self.pen.x = self.pen.x.saturating_add(adv);
                }
                ShowElement::Adjust(v) => {
                    self.pen.x = self.pen.x.saturating_sub(v.saturating_mul(ADJUST_UNIT));
                }
            }
        }
        Ok(())
    }
}
