//! Layout XML parsers.
//!
//! Both dialects answer the same three questions about a page: how many
//! lines of each type, how many regions of each type, and which characters
//! the transcription contains. [`LayoutParser`] picks the dialect once per run.

pub mod alto;
pub mod page;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::counter::FrequencyMap;
use crate::encoding::read_xml_file;
use crate::error::{HumgError, Result};
use crate::labels::LabelTable;
use crate::normalize::normalize;
use crate::types::{Dialect, NormalizationForm, RunConfig};
use crate::xml_tree::XmlDocument;

pub use alto::AltoParser;
pub use page::PageParser;

/// One loaded input file. Dropped once its counts have been extracted.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub path: PathBuf,
    pub xml: XmlDocument,
    /// Declared labels. Always empty for PAGE documents.
    pub labels: LabelTable,
}

/// Line, region and character counts, for one file or accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentCounts {
    pub lines: FrequencyMap,
    pub regions: FrequencyMap,
    pub chars: FrequencyMap,
}

impl SegmentCounts {
    pub fn merge(&mut self, other: &SegmentCounts) {
        self.lines.merge(&other.lines);
        self.regions.merge(&other.regions);
        self.chars.merge(&other.chars);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.regions.is_empty() && self.chars.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum LayoutParser {
    Alto(AltoParser),
    Page(PageParser),
}

impl LayoutParser {
    pub fn new(config: &RunConfig) -> Self {
        match config.dialect {
            Dialect::Alto => LayoutParser::Alto(AltoParser::new(
                config.normalization,
                config.sentinel_lookup,
            )),
            Dialect::Page => LayoutParser::Page(PageParser::new(config.normalization)),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            LayoutParser::Alto(_) => Dialect::Alto,
            LayoutParser::Page(_) => Dialect::Page,
        }
    }

    /// Load and parse one file.
    pub fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let content = read_xml_file(path)?;
        self.parse_str(path, &content)
    }

    /// Parse already loaded content. `path` is only used to identify the file.
    pub fn parse_str(&self, path: &Path, content: &str) -> Result<ParsedDocument> {
        match self {
            LayoutParser::Alto(p) => p.parse_str(path, content),
            LayoutParser::Page(p) => p.parse_str(path, content),
        }
    }

    pub fn get_lines(&self, doc: &ParsedDocument) -> FrequencyMap {
        match self {
            LayoutParser::Alto(p) => p.get_lines(doc),
            LayoutParser::Page(p) => p.get_lines(doc),
        }
    }

    pub fn get_regions(&self, doc: &ParsedDocument) -> FrequencyMap {
        match self {
            LayoutParser::Alto(p) => p.get_regions(doc),
            LayoutParser::Page(p) => p.get_regions(doc),
        }
    }

    pub fn get_chars(&self, doc: &ParsedDocument) -> FrequencyMap {
        match self {
            LayoutParser::Alto(p) => p.get_chars(doc),
            LayoutParser::Page(p) => p.get_chars(doc),
        }
    }

    /// Run the three extractions on one document.
    pub fn count(&self, doc: &ParsedDocument) -> SegmentCounts {
        SegmentCounts {
            lines: self.get_lines(doc),
            regions: self.get_regions(doc),
            chars: self.get_chars(doc),
        }
    }

    /// Parse `path` and count it. Nothing is returned for a file that fails.
    pub fn extract(&self, path: &Path) -> Result<SegmentCounts> {
        let doc = self.parse(path)?;
        Ok(self.count(&doc))
    }
}

pub(crate) fn load_document(path: &Path, content: &str) -> Result<XmlDocument> {
    XmlDocument::parse_str(content).map_err(|reason| HumgError::malformed(path, reason))
}

/// Join the transcription snippets of a document, drop spaces, normalize and
/// count characters.
pub(crate) fn count_chars<'a>(
    snippets: impl Iterator<Item = &'a str>,
    form: NormalizationForm,
) -> FrequencyMap {
    let joined = snippets.collect::<String>().replace(' ', "");
    // Normalization may produce spaces again (NFKC folds U+00A0), which
    // from_chars drops as well.
    FrequencyMap::from_chars(&normalize(form, &joined))
}
