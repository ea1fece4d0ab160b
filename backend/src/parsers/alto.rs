//! ALTO v4 documents.
//!
//! Segment types are declared in `<Tags>` as `OtherTag` elements and
//! referenced from `TextBlock` and `TextLine` through `TAGREFS`. The
//! transcription lives in the `CONTENT` attribute of each line's `String`
//! children.

use std::path::Path;

use crate::counter::FrequencyMap;
use crate::error::Result;
use crate::labels::LabelTable;
use crate::logger;
use crate::types::NormalizationForm;
use crate::xml_tree::XmlDocument;

use super::{count_chars, load_document, ParsedDocument};

pub const ALTO_NS: &str = "http://www.loc.gov/standards/alto/ns-v4#";

#[derive(Debug, Clone, Default)]
pub struct AltoParser {
    normalization: NormalizationForm,
    sentinel_lookup: bool,
}

impl AltoParser {
    pub fn new(normalization: NormalizationForm, sentinel_lookup: bool) -> Self {
        AltoParser {
            normalization,
            sentinel_lookup,
        }
    }

    pub fn parse_str(&self, path: &Path, content: &str) -> Result<ParsedDocument> {
        let xml = load_document(path, content)?;
        let labels = read_label_table(&xml);

        logger::debug(&format!(
            "{:?}: {} label declarations",
            path.file_name().unwrap_or_default(),
            labels.len()
        ));

        Ok(ParsedDocument {
            path: path.to_path_buf(),
            xml,
            labels,
        })
    }

    pub fn get_lines(&self, doc: &ParsedDocument) -> FrequencyMap {
        self.count_segment_types(doc, "TextLine")
    }

    pub fn get_regions(&self, doc: &ParsedDocument) -> FrequencyMap {
        self.count_segment_types(doc, "TextBlock")
    }

    pub fn get_chars(&self, doc: &ParsedDocument) -> FrequencyMap {
        let xml = &doc.xml;
        let contents = xml
            .descendants(ALTO_NS, "TextLine")
            .flat_map(|line| xml.children(line, ALTO_NS, "String"))
            .filter_map(|s| s.attr("CONTENT"));

        count_chars(contents, self.normalization)
    }

    fn count_segment_types(&self, doc: &ParsedDocument, element: &str) -> FrequencyMap {
        doc.xml
            .descendants(ALTO_NS, element)
            .map(|el| doc.labels.resolve(el.attr("TAGREFS"), self.sentinel_lookup))
            .collect()
    }
}

/// Collect `OtherTag` declarations. Declarations without both `ID` and
/// `LABEL` are ignored.
fn read_label_table(xml: &XmlDocument) -> LabelTable {
    xml.descendants(ALTO_NS, "OtherTag")
        .filter_map(|tag| match (tag.attr("ID"), tag.attr("LABEL")) {
            (Some(id), Some(label)) => Some((id, label)),
            _ => {
                logger::debug(&format!("Skipping incomplete OtherTag: {:?}", tag.attr("ID")));
                None
            }
        })
        .collect()
}
