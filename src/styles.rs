//! Font substitution: PostScript font names to CSS style strings.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

/// Style used when nothing better is known about a font.
pub const DEFAULT_FONT_STYLE: &str = "font-family:Arial;";

#[derive(Debug, Clone, PartialEq, Eq)]
struct FontEntry {
    file: String,
    style: String,
}

/// Substitution table loaded once and shared by every page driver.
///
/// The backing file holds one record per line: the font name, a font file
/// and a CSS style, each field ended by a control byte (tab, NUL, ...), the
/// record ended by a newline.
#[derive(Debug, Clone, Default)]
pub struct FontStyleTable {
    entries: HashMap<String, FontEntry>,
}

fn field(d: &[u8]) -> &[u8] {
    let end = d.iter().position(|&c| c < 32).unwrap_or(d.len());
    &d[..end]
}

fn skip_line(d: &[u8]) -> usize {
    d.iter().position(|&c| c == b'\n').unwrap_or(d.len()) + 1
}

impl FontStyleTable {
    pub fn new() -> FontStyleTable {
        FontStyleTable::default()
    }

    /// Loads the table from a file. A missing or unreadable file gives an
    /// empty table.
    pub fn load<P: AsRef<Path>>(path: P) -> FontStyleTable {
        match std::fs::read(path.as_ref()) {
            Ok(data) => FontStyleTable::from_bytes(&data),
            Err(e) => {
                debug!("no font map at {:?}: {}", path.as_ref(), e);
                FontStyleTable::default()
            }
        }
    }

    pub fn from_bytes(data: &[u8]) -> FontStyleTable {
        let mut table = FontStyleTable::default();
        let mut p = 0;
        while p < data.len() {
            let name = field(&data[p..]);
            if name.is_empty() {
                p += skip_line(&data[p..]);
                continue;
            }
            p = (p + name.len() + 1).min(data.len());
            let file = field(&data[p..]);
            p = (p + file.len() + 1).min(data.len());
            let style = field(&data[p..]);
            p += style.len();
            p += skip_line(&data[p..]);
            table.insert(
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(file),
                String::from_utf8_lossy(style),
            );
        }
        debug!("loaded {} font substitutions", table.len());
        table
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        file: impl Into<String>,
        style: impl Into<String>,
    ) {
        self.entries.insert(
            name.into(),
            FontEntry {
                file: file.into(),
                style: style.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<&FontEntry> {
        let name = name.strip_prefix('/').unwrap_or(name);
        self.entries.get(name).or_else(|| {
            // subset fonts are named `ABCDEF+BaseName`
            let (_, base) = name.split_once('+')?;
            self.entries.get(base)
        })
    }

    /// Style for a font's base name, trying the name without its subset tag
    /// before giving up on [`DEFAULT_FONT_STYLE`].
    pub fn resolve_style(&self, name: &str) -> &str {
        self.lookup(name)
            .map(|e| e.style.as_str())
            .unwrap_or(DEFAULT_FONT_STYLE)
    }

    /// Font file recorded for a font, if any.
    pub fn file_for(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|e| e.file.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FontStyleTable {
        FontStyleTable::from_bytes(
            b"Helvetica\thelvetica.ttf\tfont-family:Helvetica;\n\
              Times-Bold\0times.ttf\0font-family:Times;font-weight:bold;\r\n\
              \n\
              Courier\tcourier.ttf\tfont-family:Courier;",
        )
    }

    #[test]
    fn parses_records() {
        let t = table();
        assert_eq!(t.len(), 3);
        assert_eq!(t.resolve_style("Helvetica"), "font-family:Helvetica;");
        assert_eq!(
            t.resolve_style("Times-Bold"),
            "font-family:Times;font-weight:bold;"
        );
        assert_eq!(t.resolve_style("Courier"), "font-family:Courier;");
        assert_eq!(t.file_for("Helvetica"), Some("helvetica.ttf"));
    }

    #[test]
    fn strips_name_marker() {
        assert_eq!(table().resolve_style("/Helvetica"), "font-family:Helvetica;");
    }

    #[test]
    fn falls_back_to_name_without_subset_tag() {
        let t = table();
        assert_eq!(t.resolve_style("ABCDEF+Helvetica"), "font-family:Helvetica;");
        assert_eq!(t.resolve_style("/ABCDEF+Courier"), "font-family:Courier;");
    }

    #[test]
    fn exact_match_wins_over_subset_fallback() {
        let mut t = table();
        t.insert("ABCDEF+Helvetica", "", "font-family:Special;");
        assert_eq!(t.resolve_style("ABCDEF+Helvetica"), "font-family:Special;");
    }

    #[test]
    fn unknown_name_gets_default() {
        assert_eq!(FontStyleTable::new().resolve_style("Unknown"), DEFAULT_FONT_STYLE);
        assert_eq!(table().resolve_style("XYZ+Unknown"), DEFAULT_FONT_STYLE);
    }

    #[test]
    fn missing_file_gives_empty_table() {
        let t = FontStyleTable::load("/nonexistent/fontnamemap.txt");
        assert!(t.is_empty());
        assert_eq!(t.resolve_style("Helvetica"), DEFAULT_FONT_STYLE);
    }
}
