use std::io::Write;

use lopdf::Object;
use lopdf::content::{Content, Operation};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::decimal::{fmt_num, from_object, from_object_or};
use crate::error::OutputError;
use crate::text::SvgText;
use crate::types::{DrawingContext, ShowElement};
use crate::utils::name_to_string;

fn num(o: &Object) -> Decimal {
    from_object_or(o, Decimal::ZERO)
}

fn channel(v: Decimal) -> u8 {
    (v.clamp(Decimal::ZERO, Decimal::ONE) * Decimal::from(255i64))
        .round()
        .to_u8()
        .unwrap_or(0)
}

fn rgb_color(r: Decimal, g: Decimal, b: Decimal) -> String {
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Fill colour for a colour operator's operands, by component count.
fn fill_color(operands: &[Object]) -> Option<String> {
    let c: Vec<Decimal> = operands
        .iter()
        .filter_map(from_object)
        .map(|v| v.clamp(Decimal::ZERO, Decimal::ONE))
        .collect();
    match c[..] {
        [g] => Some(rgb_color(g, g, g)),
        [r, g, b] => Some(rgb_color(r, g, b)),
        [c, m, y, k] => {
            let one = Decimal::ONE;
            Some(rgb_color(
                (one - c) * (one - k),
                (one - m) * (one - k),
                (one - y) * (one - k),
            ))
        }
        _ => None,
    }
}

fn show_elements(array: &[Object]) -> Vec<ShowElement> {
    let mut run = Vec::with_capacity(array.len());
    for e in array {
        match e {
            Object::String(s, _) => run.push(ShowElement::Text(s.clone())),
            _ => match from_object(e) {
                Some(v) => run.push(ShowElement::Adjust(v)),
                None => debug!("kind of {:?}", e),
            },
        }
    }
    run
}

fn string_operand(operation: &Operation, index: usize) -> Option<Vec<ShowElement>> {
    match operation.operands.get(index) {
        Some(Object::String(s, _)) => Some(vec![ShowElement::Text(s.clone())]),
        _ => {
            warn!("unexpected {} operands {:?}", operation.operator, operation.operands);
            None
        }
    }
}

/// Walks a page's content stream and drives an [`SvgText`] with the text
/// operators it finds.
#[derive(Debug)]
pub(crate) struct Processor {
    ctx: DrawingContext,
    ctx_stack: Vec<DrawingContext>,
}

impl Processor {
    pub(crate) fn new(fill_color: &str) -> Processor {
        Processor {
            ctx: DrawingContext {
                fill_color: fill_color.to_owned(),
                ..DrawingContext::default()
            },
            ctx_stack: Vec::new(),
        }
    }

    pub(crate) fn process_stream<W: Write>(
        &mut self,
        text: &mut SvgText<'_, W>,
        content: &[u8],
        page_num: u32,
    ) -> Result<(), OutputError> {
        let content = match Content::decode(content) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "page {}: undecodable content stream ({}), no text emitted from it",
                    page_num, e
                );
                return Ok(());
            }
        };
        for operation in &content.operations {
            self.apply(text, operation)?;
        }
        Ok(())
    }

    fn apply<W: Write>(
        &mut self,
        text: &mut SvgText<'_, W>,
        operation: &Operation,
    ) -> Result<(), OutputError> {
        let operands = &operation.operands;
        match operation.operator.as_ref() {
            "BT" => text.set_matrix(None),
            "ET" => {}
            "Tm" => {
                if operands.len() != 6 {
                    warn!("Tm with {} operands", operands.len());
                    return Ok(());
                }
                let m = [0, 1, 2, 3, 4, 5].map(|i| num(&operands[i]));
                text.set_matrix(Some(m));
                debug!("Tm: matrix {:?}", text.matrix());
            }
            "Td" | "TD" => {
                let [tx, ty] = match &operands[..] {
                    [tx, ty] => [num(tx), num(ty)],
                    _ => {
                        warn!("{} with {} operands", operation.operator, operands.len());
                        return Ok(());
                    }
                };
                if operation.operator == "TD" {
                    self.ctx.leading = -ty;
                }
                debug!("translation: {} {}", tx, ty);
                text.move_to(tx, ty);
            }
            "T*" => text.next_line(&self.ctx),
            "TL" => {
                if let Some(l) = operands.first() {
                    self.ctx.leading = num(l);
                }
            }
            "Tf" => {
                let (Some(Ok(name)), Some(size)) =
                    (operands.first().map(|n| n.as_name()), operands.get(1))
                else {
                    warn!("unexpected Tf operands {:?}", operands);
                    return Ok(());
                };
                self.ctx.font = name_to_string(name);
                self.ctx.font_size = num(size);
                debug!("font {} size: {}", self.ctx.font, fmt_num(self.ctx.font_size));
            }
            "Tj" => {
                if let Some(run) = string_operand(operation, 0) {
                    text.show(&self.ctx, &run)?;
                }
            }
            "'" => {
                text.next_line(&self.ctx);
                if let Some(run) = string_operand(operation, 0) {
                    text.show(&self.ctx, &run)?;
                }
            }
            "\"" => {
                text.next_line(&self.ctx);
                if let Some(run) = string_operand(operation, 2) {
                    text.show(&self.ctx, &run)?;
                }
            }
            "TJ" => match operands.first() {
                Some(Object::Array(array)) => {
                    text.show(&self.ctx, &show_elements(array))?;
                }
                _ => warn!("unexpected TJ operands {:?}", operands),
            },
            "g" | "rg" | "k" | "sc" | "scn" => match fill_color(operands) {
                Some(color) => self.ctx.fill_color = color,
                None => debug!("unhandled fill color {:?}", operation),
            },
            "q" => {
                self.ctx_stack.push(self.ctx.clone());
            }
            "Q" => {
                if let Some(ctx) = self.ctx_stack.pop() {
                    self.ctx = ctx;
                } else {
                    warn!("No state to pop");
                }
            }
            _ => {
                debug!("unknown operation {:?}", operation);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_rgb_and_cmyk_fills() {
        assert_eq!(fill_color(&[Object::Integer(0)]).as_deref(), Some("#000000"));
        assert_eq!(
            fill_color(&[Object::Real(1.0), Object::Integer(0), Object::Real(0.5)]).as_deref(),
            Some("#ff0080")
        );
        assert_eq!(
            fill_color(&[0i64, 1, 1, 0].map(Object::Integer)).as_deref(),
            Some("#ff0000")
        );
        assert_eq!(fill_color(&[Object::Name(b"P0".to_vec())]), None);
    }

    #[test]
    fn out_of_range_components_are_clamped() {
        let huge = [i64::MIN, i64::MIN, 0, i64::MIN].map(Object::Integer);
        assert_eq!(fill_color(&huge).as_deref(), Some("#ffffff"));
        assert_eq!(
            fill_color(&[Object::Integer(i64::MAX)]).as_deref(),
            Some("#ffffff")
        );
    }

    #[test]
    fn tj_array_becomes_tagged_elements() {
        let run = show_elements(&[
            Object::string_literal("Hel"),
            Object::Integer(-120),
            Object::Real(33.5),
            Object::string_literal("lo"),
            Object::Null,
        ]);
        assert_eq!(
            run,
            vec![
                ShowElement::Text(b"Hel".to_vec()),
                ShowElement::Adjust(Decimal::from(-120i64)),
                ShowElement::Adjust(Decimal::new(335, 1)),
                ShowElement::Text(b"lo".to_vec()),
            ]
        );
    }
}
