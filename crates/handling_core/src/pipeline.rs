//! Parse → perturb → serialize driver.

use crate::error::Result;
use crate::parser::{parse_document, ParseMode, ParseStats};
use crate::perturb::{perturb, PerturbConfig, PerturbStats};
use crate::serializer::write_document;
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub parse_mode: ParseMode,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub text: String,
    pub parse_stats: ParseStats,
    pub perturb_stats: PerturbStats,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the whole file through the pipeline.
    ///
    /// Every call parses into a fresh document, so opaque lines from an
    /// earlier run can never leak into this one.
    pub fn run<R: Rng + ?Sized>(
        &self,
        content: &str,
        perturb_config: &PerturbConfig,
        rng: &mut R,
    ) -> Result<PipelineOutput> {
        perturb_config.validate()?;

        let mut doc = parse_document(content, self.config.parse_mode)?;
        log::info!(
            "Parsed {} vehicles ({} opaque lines, {} skipped)",
            doc.stats.parsed,
            doc.stats.opaque_lines,
            doc.stats.skipped_short
        );

        let perturb_stats = perturb(&mut doc.vehicles, perturb_config, rng);
        let text = write_document(&doc.vehicles, &doc.opaque_lines);

        Ok(PipelineOutput {
            text,
            parse_stats: doc.stats,
            perturb_stats,
        })
    }

    /// Same as [`Pipeline::run`], decoding raw bytes first.
    pub fn run_bytes<R: Rng + ?Sized>(
        &self,
        bytes: Vec<u8>,
        perturb_config: &PerturbConfig,
        rng: &mut R,
    ) -> Result<PipelineOutput> {
        let content = String::from_utf8(bytes)?;
        self.run(&content, perturb_config, rng)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// One-shot permissive run with an entropy-seeded RNG.
pub fn run(content: &str, perturb_config: &PerturbConfig) -> Result<String> {
    let mut rng = crate::perturb::seeded_rng(None);
    Ok(Pipeline::default().run(content, perturb_config, &mut rng)?.text)
}
