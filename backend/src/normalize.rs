use std::borrow::Cow;

use unicode_normalization::{is_nfc, is_nfd, is_nfkc, is_nfkd, UnicodeNormalization};

use crate::types::NormalizationForm;

/// Bring `text` into the requested Unicode normalization form.
///
/// Text that is already in that form is returned borrowed.
pub fn normalize(form: NormalizationForm, text: &str) -> Cow<'_, str> {
    match form {
        NormalizationForm::None => Cow::Borrowed(text),
        NormalizationForm::Nfc if is_nfc(text) => Cow::Borrowed(text),
        NormalizationForm::Nfc => Cow::Owned(text.nfc().collect()),
        NormalizationForm::Nfkc if is_nfkc(text) => Cow::Borrowed(text),
        NormalizationForm::Nfkc => Cow::Owned(text.nfkc().collect()),
        NormalizationForm::Nfd if is_nfd(text) => Cow::Borrowed(text),
        NormalizationForm::Nfd => Cow::Owned(text.nfd().collect()),
        NormalizationForm::Nfkd if is_nfkd(text) => Cow::Borrowed(text),
        NormalizationForm::Nfkd => Cow::Owned(text.nfkd().collect()),
    }
}
