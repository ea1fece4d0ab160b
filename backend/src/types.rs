use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The layout XML vocabulary a run reads. Fixed for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    /// ALTO v4, labels declared once as `OtherTag` and referenced by `TAGREFS`.
    #[default]
    #[serde(rename = "alto")]
    Alto,
    /// PAGE 2019, labels written inline in the `custom` attribute.
    #[serde(rename = "page")]
    Page,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Alto => "alto",
            Dialect::Page => "page",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid dialect value: {0} (expected 'alto' or 'page')")]
pub struct ParseDialectError(String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alto" => Ok(Dialect::Alto),
            "page" => Ok(Dialect::Page),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

/// Unicode normalization applied to character text before counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationForm {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "NFC")]
    Nfc,
    #[serde(rename = "NFKC")]
    Nfkc,
    #[serde(rename = "NFD")]
    Nfd,
    #[serde(rename = "NFKD")]
    Nfkd,
}

impl NormalizationForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationForm::None => "none",
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkd => "NFKD",
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid normalization form: {0} (expected none, NFC, NFKC, NFD or NFKD)")]
pub struct ParseNormalizationFormError(String);

impl FromStr for NormalizationForm {
    type Err = ParseNormalizationFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(NormalizationForm::None),
            "nfc" => Ok(NormalizationForm::Nfc),
            "nfkc" => Ok(NormalizationForm::Nfkc),
            "nfd" => Ok(NormalizationForm::Nfd),
            "nfkd" => Ok(NormalizationForm::Nfkd),
            _ => Err(ParseNormalizationFormError(s.to_string())),
        }
    }
}

/// Settings fixed at the start of a run and shared by every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub dialect: Dialect,
    pub normalization: NormalizationForm,
    /// Keep per-directory counts next to the global ones.
    pub group_by_directory: bool,
    /// Log and skip files that fail to load instead of aborting the run.
    pub skip_malformed: bool,
    /// Resolve elements without `TAGREFS` through a `####` declaration, if
    /// the document has one.
    pub sentinel_lookup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("alto".parse::<Dialect>(), Ok(Dialect::Alto));
        assert_eq!("PAGE".parse::<Dialect>(), Ok(Dialect::Page));
        assert!("hocr".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_normalization_form_from_str() {
        assert_eq!("none".parse::<NormalizationForm>(), Ok(NormalizationForm::None));
        assert_eq!("NFC".parse::<NormalizationForm>(), Ok(NormalizationForm::Nfc));
        assert_eq!("nfkd".parse::<NormalizationForm>(), Ok(NormalizationForm::Nfkd));

        let err = "NFX".parse::<NormalizationForm>().unwrap_err();
        assert!(err.to_string().contains("NFX"));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for form in [
            NormalizationForm::None,
            NormalizationForm::Nfc,
            NormalizationForm::Nfkc,
            NormalizationForm::Nfd,
            NormalizationForm::Nfkd,
        ] {
            assert_eq!(form.to_string().parse::<NormalizationForm>(), Ok(form));
        }
    }
}
