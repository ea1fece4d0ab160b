use std::path::PathBuf;

use humg_backend::corpus::{collect_input_files, run};
use humg_backend::{Aggregation, Dialect, RunConfig};

/// Fixtures are shared with the backend crate.
pub fn data_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../backend/tests/data")
        .join(rel)
}

pub fn run_alto_corpus(group_by_directory: bool) -> Aggregation {
    let config = RunConfig {
        dialect: Dialect::Alto,
        group_by_directory,
        ..Default::default()
    };
    let files = collect_input_files(&[data_path("alto")]).expect("Failed to collect");
    run(&config, &files).expect("Run failed")
}
