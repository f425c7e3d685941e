use std::fmt::Formatter;

#[derive(Debug)]
pub enum OutputError {
    IoError(std::io::Error),
    PdfError(lopdf::Error),
    XmlError(quick_xml::Error),
    PageNotFound(u32),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            OutputError::IoError(e) => write!(f, "IO error: {}", e),
            OutputError::PdfError(e) => write!(f, "PDF error: {}", e),
            OutputError::XmlError(e) => write!(f, "XML error: {}", e),
            OutputError::PageNotFound(n) => write!(f, "Page {} not found", n),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<std::io::Error> for OutputError {
    fn from(e: std::io::Error) -> Self {
        OutputError::IoError(e)
    }
}

impl From<lopdf::Error> for OutputError {
    fn from(e: lopdf::Error) -> Self {
        OutputError::PdfError(e)
    }
}

impl From<quick_xml::Error> for OutputError {
    fn from(e: quick_xml::Error) -> Self {
        OutputError::XmlError(e)
    }
}
