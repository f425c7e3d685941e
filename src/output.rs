use std::borrow::Cow;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;

use crate::decimal::fmt_num;
use crate::error::OutputError;
use crate::types::TextMatrix;

/// A positioned text run ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun<'a> {
    /// Matrix already flipped into SVG orientation.
    pub(crate) transform: TextMatrix,
    pub(crate) x: Decimal,
    pub(crate) y: Decimal,
    pub(crate) font_size: Decimal,
    pub(crate) style: &'a str,
    pub(crate) fill: &'a str,
    pub(crate) text: &'a str,
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Replaces characters XML 1.0 does not allow (C0 controls, U+FFFE, U+FFFF)
/// with U+FFFD.
fn xml_safe(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(
            s.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

/// Writes a run as
///
/// ```text
/// <g transform="matrix(...)">
/// <text x=".." y=".." font-size=".." stroke="none" style=".." fill="..">..</text>
/// </g>
/// ```
///
/// Attribute values and text content are XML-escaped and stripped of
/// characters XML cannot carry, so every fragment is well-formed on its own.
pub(crate) fn write_text_run<W: Write>(out: W, run: &TextRun) -> Result<(), OutputError> {
    let mut writer = Writer::new(out);
    let transform = run.transform.to_svg();
    let x = fmt_num(run.x);
    let y = fmt_num(run.y);
    let font_size = fmt_num(run.font_size);
    let style = xml_safe(run.style);
    let fill = xml_safe(run.fill);
    let text = xml_safe(run.text);

    writer.write_event(Event::Start(
        BytesStart::new("g").with_attributes([("transform", transform.as_str())]),
    ))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    writer.write_event(Event::Start(BytesStart::new("text").with_attributes([
        ("x", x.as_str()),
        ("y", y.as_str()),
        ("font-size", font_size.as_str()),
        ("stroke", "none"),
        ("style", &*style),
        ("fill", &*fill),
    ])))?;
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    writer.write_event(Event::End(BytesEnd::new("g")))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}
