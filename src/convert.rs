use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::OutputError;
use crate::processor::Processor;
use crate::styles::FontStyleTable;
use crate::text::SvgText;
use crate::types::DEFAULT_FILL_COLOR;

/// Builder for configuring SVG text conversion.
///
/// # Examples
///
/// ```no_run
/// use pdf_svgtext::SvgTextConverter;
///
/// let pages = SvgTextConverter::builder()
///     .password("secret")
///     .font_map("fontnamemap.txt")
///     .build()
///     .from_path("encrypted.pdf")?;
/// # Ok::<(), pdf_svgtext::OutputError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgTextConverterBuilder {
    password: Option<String>,
    font_map: Option<PathBuf>,
    styles: Option<FontStyleTable>,
    fill_color: Option<String>,
}

impl SvgTextConverterBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password for encrypted PDFs.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Load font substitutions from a font map file. A missing file means no
    /// substitutions.
    pub fn font_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_map = Some(path.into());
        self
    }

    /// Use an already built substitution table. Takes precedence over
    /// [`font_map`](Self::font_map).
    pub fn styles(mut self, styles: FontStyleTable) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Fill colour used until the content stream sets one.
    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    /// Build the converter, loading the font map if one was given.
    pub fn build(self) -> SvgTextConverter {
        let styles = match (self.styles, self.font_map) {
            (Some(styles), _) => styles,
            (None, Some(path)) => FontStyleTable::load(path),
            (None, None) => FontStyleTable::default(),
        };
        SvgTextConverter {
            password: self.password,
            styles,
            fill_color: self
                .fill_color
                .unwrap_or_else(|| DEFAULT_FILL_COLOR.to_owned()),
        }
    }
}

/// Converts the text of PDF pages into SVG text fragments.
///
/// # Examples
///
/// ```no_run
/// use pdf_svgtext::SvgTextConverter;
///
/// let converter = SvgTextConverter::default();
/// for (i, page) in converter.from_path("file.pdf")?.iter().enumerate() {
///     println!("<!-- page {} -->\n{}", i + 1, page);
/// }
/// # Ok::<(), pdf_svgtext::OutputError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SvgTextConverter {
    password: Option<String>,
    styles: FontStyleTable,
    fill_color: String,
}

impl Default for SvgTextConverter {
    fn default() -> Self {
        SvgTextConverterBuilder::new().build()
    }
}

impl SvgTextConverter {
    /// Create a builder for configuring conversion options.
    pub fn builder() -> SvgTextConverterBuilder {
        SvgTextConverterBuilder::new()
    }

    pub fn styles(&self) -> &FontStyleTable {
        &self.styles
    }

    /// Load and, if needed, decrypt a PDF file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Document, OutputError> {
        let mut doc = Document::load(path)?;
        self.decrypt(&mut doc)?;
        Ok(doc)
    }

    /// Load and, if needed, decrypt a PDF held in memory.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Document, OutputError> {
        let mut doc = Document::load_mem(bytes)?;
        self.decrypt(&mut doc)?;
        Ok(doc)
    }

    fn decrypt(&self, doc: &mut Document) -> Result<(), OutputError> {
        if doc.is_encrypted() {
            if let Some(password) = &self.password {
                doc.decrypt(password)?;
            } else {
                doc.decrypt("")?;
            }
        }
        Ok(())
    }

    /// Convert the text of a PDF file, one fragment string per page.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, OutputError> {
        let doc = self.load_path(path)?;
        self.convert_document(&doc)
    }

    /// Convert the text of a PDF in memory.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, OutputError> {
        let doc = self.load_bytes(bytes)?;
        self.convert_document(&doc)
    }

    /// Convert the text of a PDF read from `reader`.
    pub fn from_reader<R: Read>(&self, mut reader: R) -> Result<Vec<String>, OutputError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.from_bytes(&bytes)
    }

    /// Write the text fragments of page `page_num` (1-based) to `out`,
    /// returning the sink.
    pub fn convert_page<W: Write>(
        &self,
        doc: &Document,
        page_num: u32,
        out: W,
    ) -> Result<W, OutputError> {
        let page_id = *doc
            .get_pages()
            .get(&page_num)
            .ok_or(OutputError::PageNotFound(page_num))?;
        let mut text = SvgText::new(doc, page_num, &self.styles, out);
        let content = match doc.get_page_content(page_id) {
            Ok(content) => content,
            Err(e) => {
                warn!("No content for page {}: {}", page_num, e);
                return Ok(text.into_inner());
            }
        };
        debug!("page {}: {} content bytes", page_num, content.len());
        Processor::new(&self.fill_color).process_stream(&mut text, &content, page_num)?;
        Ok(text.into_inner())
    }

    /// Convert every page of a loaded document, in page order.
    pub fn convert_document(&self, doc: &Document) -> Result<Vec<String>, OutputError> {
        let mut pages = Vec::new();
        for &page_num in doc.get_pages().keys() {
            let out = self.convert_page(doc, page_num, Vec::new())?;
            pages.push(String::from_utf8_lossy(&out).into_owned());
        }
        Ok(pages)
    }
}

/// Convert the text of a PDF file using default settings.
///
/// # Examples
///
/// ```no_run
/// let pages = pdf_svgtext::from_path("file.pdf")?;
/// print!("{}", pages.concat());
/// # Ok::<(), pdf_svgtext::OutputError>(())
/// ```
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, OutputError> {
    SvgTextConverter::default().from_path(path)
}

/// Convert the text of a PDF in memory using default settings.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<String>, OutputError> {
    SvgTextConverter::default().from_bytes(bytes)
}

/// Convert the text of a PDF reader using default settings.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<String>, OutputError> {
    SvgTextConverter::default().from_reader(reader)
}
