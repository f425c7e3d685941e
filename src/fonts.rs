use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object};
use tracing::debug;

use crate::cmap::CharMap;
use crate::decimal::{from_object, int_scaled};
use crate::utils::*;

/// Widths are kept as integers in units of 1/`WIDTH_DENSITY` glyph space.
pub const WIDTH_DENSITY: i64 = 10000;

/// Width used for every code a font does not describe (Courier's 600).
pub const DEFAULT_WIDTH: i64 = 600 * WIDTH_DENSITY / 1000;

/// Width used for a single `/Widths` entry that cannot be read.
pub const FALLBACK_ENTRY_WIDTH: i64 = WIDTH_DENSITY / 1000;

pub type WidthTable = [i64; 256];

/// Per-page font lookups, cached for the lifetime of one page driver.
pub(crate) struct FontCache<'a> {
    doc: &'a Document,
    page: u32,
    fonts: Option<HashMap<String, &'a Dictionary>>,
    widths: HashMap<String, WidthTable>,
    cmaps: HashMap<String, CharMap>,
}

fn resource_key(font: &str) -> &str {
    font.strip_prefix('/').unwrap_or(font)
}

fn load_page_fonts<'a>(doc: &'a Document, page: u32) -> HashMap<String, &'a Dictionary> {
    let mut fonts = HashMap::new();
    let Some(&page_id) = doc.get_pages().get(&page) else {
        debug!("page {} not in document, no fonts", page);
        return fonts;
    };
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        debug!("page {} object is not a dictionary", page);
        return fonts;
    };
    let font_dict = get_inherited(doc, page_dict, b"Resources")
        .and_then(|r| r.as_dict().ok())
        .and_then(|r| maybe_get_dict(doc, r, b"Font"));
    let Some(font_dict) = font_dict else {
        debug!("page {} has no font resources", page);
        return fonts;
    };
    for (name, font) in font_dict.iter() {
        match maybe_deref(doc, font).and_then(|f| f.as_dict().ok()) {
            Some(font) => {
                fonts.insert(name_to_string(name), font);
            }
            None => debug!("font resource {} is not a dictionary", name_to_string(name)),
        }
    }
    debug!("page {} fonts: {:?}", page, fonts.keys().collect::<Vec<_>>());
    fonts
}

fn integer_field(doc: &Document, font: &Dictionary, key: &[u8]) -> Option<i64> {
    maybe_get_obj(doc, font, key).map(|o| from_object(o).map_or(0, |v| int_scaled(v, 1, 0)))
}

/// Overwrites `table` with the font's `/Widths` for codes
/// `FirstChar..LastChar`.
///
/// The upper bound is exclusive, so the width given for `LastChar` itself is
/// never applied.
fn fill_widths(doc: &Document, font: &Dictionary, table: &mut WidthTable) {
    let (Some(first), Some(last), Some(widths)) = (
        integer_field(doc, font, b"FirstChar"),
        integer_field(doc, font, b"LastChar"),
        maybe_get_array(doc, font, b"Widths"),
    ) else {
        debug!("font has no FirstChar/LastChar/Widths, keeping default widths");
        return;
    };
    debug!("first_char {}, last_char {}, {} widths", first, last, widths.len());
    for code in first.max(0)..last.min(table.len() as i64) {
        let w = usize::try_from(code - first)
            .ok()
            .and_then(|i| widths.get(i))
            .and_then(|o| maybe_deref(doc, o))
            .and_then(from_object)
            .map_or(FALLBACK_ENTRY_WIDTH, |w| {
                int_scaled(w, WIDTH_DENSITY / 1000, FALLBACK_ENTRY_WIDTH)
            });
        table[code as usize] = w;
    }
}

impl<'a> FontCache<'a> {
    pub(crate) fn new(doc: &'a Document, page: u32) -> FontCache<'a> {
        FontCache {
            doc,
            page,
            fonts: None,
            widths: HashMap::new(),
            cmaps: HashMap::new(),
        }
    }

    /// Font dictionary for a resource name on this page. The page's font
    /// resources are resolved on first use only.
    pub(crate) fn font_dict(&mut self, font: &str) -> Option<&'a Dictionary> {
        let (doc, page) = (self.doc, self.page);
        self.fonts
            .get_or_insert_with(|| load_page_fonts(doc, page))
            .get(resource_key(font))
            .copied()
    }

    /// Advance widths for every byte code of a font.
    pub(crate) fn widths(&mut self, font: &str) -> &WidthTable {
        if !self.widths.contains_key(font) {
            // registered before the dictionary is consulted, so a font that
            // fails to resolve keeps answering with the default table
            self.widths.insert(font.to_owned(), [DEFAULT_WIDTH; 256]);
            if let Some(dict) = self.font_dict(font) {
                if let Some(table) = self.widths.get_mut(font) {
                    fill_widths(self.doc, dict, table);
                }
            }
        }
        &self.widths[font]
    }

    /// Character map for a font: its `/ToUnicode` CMap, or identity.
    pub(crate) fn char_map(&mut self, font: &str) -> &CharMap {
        if !self.cmaps.contains_key(font) {
            let doc = self.doc;
            let cmap = match self
                .font_dict(font)
                .and_then(|d| maybe_get_obj(doc, d, b"ToUnicode"))
            {
                Some(Object::Stream(s)) => CharMap::from_to_unicode(&get_contents(s)),
                _ => CharMap::identity(),
            };
            self.cmaps.insert(font.to_owned(), cmap);
        }
        &self.cmaps[font]
    }

    /// PostScript name of a font: the descriptor's `/FontName`, else
    /// `/BaseFont`.
    pub(crate) fn font_name(&mut self, font: &str) -> Option<String> {
        let doc = self.doc;
        let dict = self.font_dict(font)?;
        maybe_get_dict(doc, dict, b"FontDescriptor")
            .and_then(|d| maybe_get_name(doc, d, b"FontName"))
            .or_else(|| maybe_get_name(doc, dict, b"BaseFont"))
            .map(name_to_string)
    }
}
