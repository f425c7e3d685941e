//! Decimal helpers for text-space arithmetic.
//!
//! Coordinates, widths and sizes stay in [`Decimal`] from the moment they are
//! read out of the PDF until they are written into the SVG, so long chains of
//! pen advances never pick up binary rounding error.

use std::str::FromStr;

use lopdf::Object;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Reads a numeric PDF object as a decimal.
///
/// Reals go through their shortest round-trip text, so an operand written as
/// `0.1` in the content stream comes back as exactly `0.1`.
pub(crate) fn from_object(o: &Object) -> Option<Decimal> {
    match o {
        &Object::Integer(i) => Some(Decimal::from(i)),
        &Object::Real(f) if f.is_finite() => Decimal::from_str(&f.to_string()).ok(),
        _ => None,
    }
}

pub(crate) fn from_object_or(o: &Object, default: Decimal) -> Decimal {
    from_object(o).unwrap_or(default)
}

/// `trunc(value * scale)` as an integer, or `default` when it does not fit.
pub(crate) fn int_scaled(value: Decimal, scale: i64, default: i64) -> i64 {
    value
        .checked_mul(Decimal::from(scale))
        .and_then(|v| v.trunc().to_i64())
        .unwrap_or(default)
}

/// Formats a decimal the way it is written into SVG attributes: no trailing
/// zeros and never `-0`.
pub(crate) fn fmt_num(d: Decimal) -> String {
    let d = d.normalize();
    if d.is_zero() {
        "0".to_owned()
    } else {
        d.to_string()
    }
}
