//! Handling Bomb library
//!
//! File-level wrappers around `handling_core`: read the input, resolve the
//! run config, write the perturbed file and an optional JSON summary.

use anyhow::{Context, Result};
use handling_core::{
    seeded_rng, FieldGroup, ParseMode, ParseStats, ParsedDocument, PerturbStats, RunConfig,
    Session, Toggles,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line values that take precedence over a config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub offset_percent: Option<f64>,
    /// Groups switched on from the command line
    pub enable: Vec<FieldGroup>,
    pub seed: Option<u64>,
    pub strict: bool,
}

/// What a run did, saved next to the output when requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub offset_percent: f64,
    pub toggles: Toggles,
    /// `None` when the RNG was seeded from OS entropy
    pub seed: Option<u64>,
    pub parse_mode: ParseMode,
    pub parse_stats: ParseStats,
    pub perturb_stats: PerturbStats,
    /// RFC3339
    pub created_at: String,
}

/// Load the config file (if any) and apply command-line overrides.
pub fn resolve_config(config_path: Option<&Path>, overrides: &Overrides) -> Result<RunConfig> {
    let mut config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read run config: {}", path.display()))?;
            RunConfig::from_json(&json)
                .with_context(|| format!("Failed to parse run config: {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    if let Some(offset) = overrides.offset_percent {
        config.offset_percent = offset;
    }
    for group in &overrides.enable {
        config.toggles.set(*group, true);
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if overrides.strict {
        config.parse_mode = ParseMode::Strict;
    }

    config.validate()?;
    Ok(config)
}

/// Perturb `input` and write the result to `output`.
pub fn bomb(input: &Path, output: &Path, config: &RunConfig) -> Result<RunSummary> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let mut session = Session::with_parse_mode(config.parse_mode);
    session
        .load_bytes(bytes)
        .with_context(|| format!("Failed to decode input file: {}", input.display()))?;

    if !config.toggles.any() {
        log::warn!("No field groups enabled, output will only be re-formatted");
    }

    let mut rng = seeded_rng(config.seed);
    let result = session
        .apply_to_file(config.offset_percent, config.toggles, &mut rng, output)
        .with_context(|| format!("Failed to perturb {}", input.display()))?;

    Ok(RunSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        offset_percent: config.offset_percent,
        toggles: config.toggles,
        seed: config.seed,
        parse_mode: config.parse_mode,
        parse_stats: result.parse_stats,
        perturb_stats: result.perturb_stats,
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Parse `input` without perturbing it.
pub fn inspect(input: &Path, mode: ParseMode) -> Result<ParsedDocument> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let doc = handling_core::parse_document(&content, mode)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    Ok(doc)
}

pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}
