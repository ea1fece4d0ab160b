//! Segment type labels.
//!
//! ALTO declares its labels once (`<OtherTag ID="BT1" LABEL="MainZone"/>`)
//! and structural elements point at them through `TAGREFS`. PAGE has no
//! declaration section; eScriptorium writes the label inline on each element
//! as `custom="structure {type:MainZone;}"`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::logger;

/// Label used whenever an element's type cannot be determined.
pub const UNKNOWN_SEGMENT_TYPE: &str = "Not specified";

/// Reference used in place of a missing or unknown `TAGREFS` value.
pub const UNRESOLVED_TAG_REF: &str = "####";

const CUSTOM_TYPE_PREFIX: &str = "structure {type:";
const CUSTOM_TYPE_SUFFIX: &str = ";}";

lazy_static! {
    // One `name {key:value; ...}` group of a PAGE custom attribute.
    static ref RE_CUSTOM_GROUP: Regex = Regex::new(
        r"\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*\{([^{}]*)\}"
    ).unwrap();
}

/// Identifier to label mapping declared by one ALTO document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(id.into(), label.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolve a `TAGREFS` value to a segment type.
    ///
    /// The value is looked up as a whole. A reference that is not declared
    /// degrades to [`UNKNOWN_SEGMENT_TYPE`]. With `sentinel_lookup`, an
    /// element without `TAGREFS` is resolved as [`UNRESOLVED_TAG_REF`] first.
    pub fn resolve(&self, tag_ref: Option<&str>, sentinel_lookup: bool) -> &str {
        match tag_ref {
            Some(id) => self.get(id).unwrap_or_else(|| {
                logger::debug(&format!("Unresolved tag reference: {:?}", id));
                UNKNOWN_SEGMENT_TYPE
            }),
            None if sentinel_lookup => self.get(UNRESOLVED_TAG_REF).unwrap_or(UNKNOWN_SEGMENT_TYPE),
            None => UNKNOWN_SEGMENT_TYPE,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LabelTable::new();
        for (id, label) in iter {
            table.insert(id, label);
        }
        table
    }
}

/// Outcome of reading a PAGE `custom` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomType {
    /// The attribute followed the `name {key:value;}` grammar and carried a
    /// `structure` group with a `type` key.
    Structured(String),
    /// Anything else: the raw value with every `structure {type:` and `;}`
    /// removed and surrounding whitespace trimmed.
    Unstructured(String),
}

impl CustomType {
    pub fn label(&self) -> &str {
        match self {
            CustomType::Structured(label) | CustomType::Unstructured(label) => label,
        }
    }
}

/// Parse a PAGE `custom` attribute value.
///
/// Grammar: `custom := group*`, `group := NAME '{' (KEY ':' VALUE ';')* '}'`.
pub fn parse_custom_type(value: &str) -> CustomType {
    match parse_custom_groups(value) {
        Some(groups) => {
            let structure_type = groups
                .iter()
                .filter(|(name, _)| name == "structure")
                .flat_map(|(_, props)| props.iter())
                .find(|(key, _)| key == "type")
                .map(|(_, v)| v.clone());

            match structure_type {
                Some(label) => CustomType::Structured(label),
                None => CustomType::Unstructured(strip_custom_delimiters(value)),
            }
        }
        None => CustomType::Unstructured(strip_custom_delimiters(value)),
    }
}

/// Segment type for a PAGE element given its (possibly absent) `custom` value.
pub fn segment_type_from_custom(custom: Option<&str>) -> String {
    let Some(value) = custom else {
        return UNKNOWN_SEGMENT_TYPE.to_string();
    };

    let parsed = parse_custom_type(value);
    if let CustomType::Unstructured(_) = parsed {
        logger::debug(&format!("Custom attribute without structure type: {:?}", value));
    }

    parsed.label().to_string()
}

type CustomGroup = (String, Vec<(String, String)>);

fn parse_custom_groups(value: &str) -> Option<Vec<CustomGroup>> {
    let mut groups = Vec::new();
    let mut pos = 0;

    while !value[pos..].trim().is_empty() {
        let caps = RE_CUSTOM_GROUP.captures_at(value, pos)?;
        let whole = caps.get(0)?;
        if !value[pos..whole.start()].trim().is_empty() {
            return None;
        }

        let name = caps.get(1)?.as_str().to_string();
        let props = parse_custom_properties(caps.get(2)?.as_str())?;
        groups.push((name, props));
        pos = whole.end();
    }

    Some(groups)
}

fn parse_custom_properties(body: &str) -> Option<Vec<(String, String)>> {
    let mut props = Vec::new();
    let mut rest = body;

    while !rest.trim().is_empty() {
        let end = rest.find(';')?;
        let (key, value) = rest[..end].split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        props.push((key.to_string(), value.trim().to_string()));
        rest = &rest[end + 1..];
    }

    Some(props)
}

fn strip_custom_delimiters(value: &str) -> String {
    value
        .replace(CUSTOM_TYPE_PREFIX, "")
        .replace(CUSTOM_TYPE_SUFFIX, "")
        .trim()
        .to_string()
}
