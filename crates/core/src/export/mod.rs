//! XML export documents for desktop publishing tools.
//!
//! Each builder turns in-memory generated content into a complete,
//! well-formed document string. Nothing reads these documents back.

pub mod crossword;
pub mod filename;
pub mod horoscope;

pub use crossword::{build_crossword_export, crossword_xml};
pub use filename::{crossword_filename, crossword_stem, HOROSCOPE_FILENAME};
pub use horoscope::{build_horoscope_export, horoscope_xml};

use crate::xml::XML_MIME_TYPE;

/// A serialized export ready to be handed to the download trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// File name offered to the user, used verbatim.
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

impl ExportDocument {
    pub fn xml(filename: impl Into<String>, body: String) -> Self {
        Self {
            filename: filename.into(),
            mime_type: XML_MIME_TYPE,
            body,
        }
    }
}
