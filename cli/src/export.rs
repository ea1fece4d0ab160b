//! Machine readable summaries: GitHub environment file and JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use humg_backend::Aggregation;

/// Written by `--github-envs` when no path is given.
pub const DEFAULT_ENVS_FILE: &str = "envs.txt";

/// The four catalogue figures of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    pub lines: u64,
    pub files: usize,
    pub regions: u64,
    pub characters: u64,
}

impl CorpusSummary {
    pub fn from_aggregation(aggregation: &Aggregation) -> Self {
        CorpusSummary {
            lines: aggregation.lines().total(),
            files: aggregation.file_count(),
            regions: aggregation.regions().total(),
            characters: aggregation.chars().total(),
        }
    }
}

/// JSON export keeps the values as strings.
#[derive(Serialize)]
struct JsonSummary {
    lines: String,
    files: String,
    regions: String,
    characters: String,
}

impl From<&CorpusSummary> for JsonSummary {
    fn from(s: &CorpusSummary) -> Self {
        JsonSummary {
            lines: s.lines.to_string(),
            files: s.files.to_string(),
            regions: s.regions.to_string(),
            characters: s.characters.to_string(),
        }
    }
}

pub fn github_envs(summary: &CorpusSummary) -> String {
    format!(
        "HTRUNITED_LINES={}\nHTRUNITED_REGNS={}\nHTRUNITED_CHARS={}\nHTRUNITED_FILES={}\n",
        summary.lines, summary.regions, summary.characters, summary.files
    )
}

pub fn write_github_envs(path: &Path, summary: &CorpusSummary) -> Result<()> {
    fs::write(path, github_envs(summary))
        .with_context(|| format!("Failed to write environment file {:?}", path))
}

pub fn to_json(summary: &CorpusSummary) -> Result<String> {
    serde_json::to_string(&JsonSummary::from(summary)).context("Failed to serialize summary")
}

pub fn write_json(path: &Path, summary: &CorpusSummary) -> Result<()> {
    let json = to_json(summary)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON file {:?}", path))
}
