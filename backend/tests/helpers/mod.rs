use std::path::PathBuf;

use humg_backend::{Dialect, NormalizationForm, RunConfig};

/// Path of a fixture under `tests/data/`.
pub fn data_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(rel)
}

#[allow(dead_code)]
pub fn config(dialect: Dialect) -> RunConfig {
    RunConfig {
        dialect,
        normalization: NormalizationForm::None,
        ..Default::default()
    }
}
