use rust_decimal::Decimal;

use crate::decimal::fmt_num;
use crate::literal::unescape;

/// Default fill when the content stream never sets one.
pub const DEFAULT_FILL_COLOR: &str = "black";

/// Text and colour settings owned by the host interpreter and read by the
/// driver whenever a positioning or show operator fires.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    /// Font resource name as used by `Tf`, e.g. `F1`.
    pub font: String,
    pub font_size: Decimal,
    pub leading: Decimal,
    /// Fill colour, already formatted for SVG.
    pub fill_color: String,
}

impl Default for DrawingContext {
    fn default() -> Self {
        DrawingContext {
            font: String::new(),
            font_size: Decimal::ZERO,
            leading: Decimal::ZERO,
            fill_color: DEFAULT_FILL_COLOR.to_owned(),
        }
    }
}

/// One element of a `TJ` array.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowElement {
    /// Raw string bytes, already unescaped.
    Text(Vec<u8>),
    /// Position adjustment in thousandths of text space.
    Adjust(Decimal),
}

impl ShowElement {
    /// Builds a text element from a string token as written in the content
    /// stream, e.g. `(Hello\))`.
    pub fn from_token(token: &[u8]) -> ShowElement {
        ShowElement::Text(unescape(token))
    }
}

/// Text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatrix {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
    pub d: Decimal,
    pub e: Decimal,
    pub f: Decimal,
}

impl TextMatrix {
    pub const IDENTITY: TextMatrix = TextMatrix {
        a: Decimal::ONE,
        b: Decimal::ZERO,
        c: Decimal::ZERO,
        d: Decimal::ONE,
        e: Decimal::ZERO,
        f: Decimal::ZERO,
    };

    pub fn new(values: [Decimal; 6]) -> TextMatrix {
        let [a, b, c, d, e, f] = values;
        TextMatrix { a, b, c, d, e, f }
    }

    /// The matrix with `c` and `d` negated, which is how text space is
    /// expressed in SVG's y-down coordinates.
    pub fn flipped(&self) -> TextMatrix {
        TextMatrix {
            c: -self.c,
            d: -self.d,
            ..*self
        }
    }

    /// SVG `matrix(...)` transform value.
    pub fn to_svg(&self) -> String {
        format!(
            "matrix({},{},{},{},{},{})",
            fmt_num(self.a),
            fmt_num(self.b),
            fmt_num(self.c),
            fmt_num(self.d),
            fmt_num(self.e),
            fmt_num(self.f)
        )
    }
}

impl Default for TextMatrix {
    fn default() -> Self {
        TextMatrix::IDENTITY
    }
}

/// Pen position within the current text object.
///
/// `line_x` is where the current line started; `next_line` returns `x` to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenState {
    pub line_x: Decimal,
    pub x: Decimal,
    pub y: Decimal,
}
