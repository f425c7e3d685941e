//! PDF text to SVG conversion library
//!
//! This library renders the text painted by a PDF page's content stream as SVG
//! `<text>` elements, keeping glyph positions, advance widths and the text
//! matrix exact by doing all coordinate math in decimal.

mod cmap;
mod convert;
mod decimal;
mod error;
mod fonts;
mod literal;
mod output;
mod processor;
mod styles;
mod text;
mod types;
mod utils;

// Re-export error type
pub use error::OutputError;

// Re-export conversion API
pub use convert::{SvgTextConverter, SvgTextConverterBuilder, from_bytes, from_path, from_reader};

// Re-export the page driver and its building blocks
pub use cmap::CharMap;
pub use fonts::{DEFAULT_WIDTH, FALLBACK_ENTRY_WIDTH, WIDTH_DENSITY, WidthTable};
pub use literal::unescape;
pub use styles::{DEFAULT_FONT_STYLE, FontStyleTable};
pub use text::SvgText;
pub use types::{DEFAULT_FILL_COLOR, DrawingContext, PenState, ShowElement, TextMatrix};

pub use rust_decimal::Decimal;
