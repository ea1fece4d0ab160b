//! PAGE 2019 documents.
//!
//! There is no label declaration section; the segment type is stored on each
//! `TextRegion` and `TextLine` in the `custom` attribute. The transcription of
//! a line is the text of `TextLine/TextEquiv/Unicode`. Word and glyph level
//! `TextEquiv` elements are not counted, they repeat the line text.

use std::path::Path;

use crate::counter::FrequencyMap;
use crate::error::Result;
use crate::labels::{segment_type_from_custom, LabelTable};
use crate::types::NormalizationForm;

use super::{count_chars, load_document, ParsedDocument};

pub const PAGE_NS: &str = "http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15";

#[derive(Debug, Clone, Default)]
pub struct PageParser {
    normalization: NormalizationForm,
}

impl PageParser {
    pub fn new(normalization: NormalizationForm) -> Self {
        PageParser { normalization }
    }

    pub fn parse_str(&self, path: &Path, content: &str) -> Result<ParsedDocument> {
        let xml = load_document(path, content)?;
        Ok(ParsedDocument {
            path: path.to_path_buf(),
            xml,
            labels: LabelTable::new(),
        })
    }

    pub fn get_lines(&self, doc: &ParsedDocument) -> FrequencyMap {
        count_segment_types(doc, "TextLine")
    }

    pub fn get_regions(&self, doc: &ParsedDocument) -> FrequencyMap {
        count_segment_types(doc, "TextRegion")
    }

    pub fn get_chars(&self, doc: &ParsedDocument) -> FrequencyMap {
        let xml = &doc.xml;
        let texts = xml
            .descendants(PAGE_NS, "TextLine")
            .flat_map(|line| xml.children(line, PAGE_NS, "TextEquiv"))
            .flat_map(|equiv| xml.children(equiv, PAGE_NS, "Unicode"))
            .map(|unicode| unicode.text());

        count_chars(texts, self.normalization)
    }
}

fn count_segment_types(doc: &ParsedDocument, element: &str) -> FrequencyMap {
    doc.xml
        .descendants(PAGE_NS, element)
        .map(|el| segment_type_from_custom(el.attr("custom")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::UNKNOWN_SEGMENT_TYPE;

    fn page(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Metadata><Creator>escriptorium</Creator></Metadata>
  <Page imageFilename="f1.jpg" imageWidth="100" imageHeight="100">{}</Page>
</PcGts>"#,
            body
        )
    }

    fn parse(xml: &str) -> ParsedDocument {
        PageParser::default().parse_str(Path::new("test.xml"), xml).unwrap()
    }

    #[test]
    fn test_region_label_from_custom() {
        let doc = parse(&page(
            r#"<TextRegion id="r1" custom="structure {type:marginalia ;}"/>
               <TextRegion id="r2"/>"#,
        ));

        let regions = PageParser::default().get_regions(&doc);
        assert_eq!(regions.get("marginalia"), 1);
        assert_eq!(regions.get(UNKNOWN_SEGMENT_TYPE), 1);
        assert!(doc.labels.is_empty());
    }

    #[test]
    fn test_line_labels_and_fallback() {
        let doc = parse(&page(
            r#"<TextRegion id="r1">
                 <TextLine id="l1" custom="structure {type:heading;}"/>
                 <TextLine id="l2" custom="readingOrder {index:1;} structure {type:heading;}"/>
                 <TextLine id="l3" custom="structure {type:default}"/>
                 <TextLine id="l4"/>
               </TextRegion>"#,
        ));

        let lines = PageParser::default().get_lines(&doc);
        assert_eq!(lines.get("heading"), 2);
        assert_eq!(lines.get("default}"), 1);
        assert_eq!(lines.get(UNKNOWN_SEGMENT_TYPE), 1);
        assert_eq!(lines.total(), 4);
    }

    #[test]
    fn test_empty_custom_keeps_empty_label() {
        let doc = parse(&page(
            r#"<TextRegion id="r1" custom=""/>
               <TextRegion id="r2" custom="structure {type:;}"/>
               <TextRegion id="r3"/>"#,
        ));

        let regions = PageParser::default().get_regions(&doc);
        assert_eq!(regions.get(""), 2);
        assert_eq!(regions.get(UNKNOWN_SEGMENT_TYPE), 1);
    }

    #[test]
    fn test_chars_only_from_line_level_text_equiv() {
        let doc = parse(&page(
            r#"<TextRegion id="r1">
                 <TextLine id="l1">
                   <Word id="w1"><TextEquiv><Unicode>ab</Unicode></TextEquiv></Word>
                   <TextEquiv><Unicode>ab c</Unicode></TextEquiv>
                 </TextLine>
                 <TextEquiv><Unicode>region text</Unicode></TextEquiv>
               </TextRegion>"#,
        ));

        let chars = PageParser::default().get_chars(&doc);
        assert_eq!(chars.get("a"), 1);
        assert_eq!(chars.get("b"), 1);
        assert_eq!(chars.get("c"), 1);
        assert_eq!(chars.total(), 3);
    }

    #[test]
    fn test_normalization_applies_to_chars() {
        let doc = parse(&page(
            r#"<TextRegion id="r1"><TextLine id="l1">
                 <TextEquiv><Unicode>&#xFB01;</Unicode></TextEquiv>
               </TextLine></TextRegion>"#,
        ));

        let plain = PageParser::new(NormalizationForm::None).get_chars(&doc);
        assert_eq!(plain.get("\u{FB01}"), 1);

        let folded = PageParser::new(NormalizationForm::Nfkc).get_chars(&doc);
        assert_eq!(folded.get("f"), 1);
        assert_eq!(folded.get("i"), 1);
    }

    #[test]
    fn test_empty_unicode_counts_nothing() {
        let doc = parse(&page(
            r#"<TextRegion id="r1"><TextLine id="l1">
                 <TextEquiv><Unicode/></TextEquiv>
               </TextLine></TextRegion>"#,
        ));
        assert!(PageParser::default().get_chars(&doc).is_empty());
    }
}
