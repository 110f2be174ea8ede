//! Editing session
//!
//! Holds the currently loaded file for one caller. Records and opaque lines
//! are rebuilt on every apply, so two sessions never share mutable state and
//! a reload cannot leak lines from the previous file.

use crate::error::{HandlingError, Result};
use crate::parser::ParseMode;
use crate::perturb::{PerturbConfig, Toggles};
use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput};
use rand::Rng;
use std::fs;
use std::path::Path;

/// Default output file name used by the front ends
pub const DEFAULT_OUTPUT_FILE: &str = "ohandling.dat";

pub struct Session {
    pipeline: Pipeline,
    current: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_parse_mode(ParseMode::Permissive)
    }

    pub fn with_parse_mode(parse_mode: ParseMode) -> Self {
        Self {
            pipeline: Pipeline::new(PipelineConfig { parse_mode }),
            current: None,
        }
    }

    /// Replace the loaded file.
    pub fn load_file(&mut self, content: impl Into<String>) {
        let content = content.into();
        log::info!("File loaded ({} bytes)", content.len());
        self.current = Some(content);
    }

    /// Decode and replace the loaded file. On a decode error the previous
    /// file stays loaded.
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<()> {
        let content = String::from_utf8(bytes)?;
        self.load_file(content);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Parse the loaded file, perturb it and return the new text.
    ///
    /// `offset_percent` is the jitter bound in percent (10.0 = up to 10%).
    pub fn apply_perturbation<R: Rng + ?Sized>(
        &self,
        offset_percent: f64,
        toggles: Toggles,
        rng: &mut R,
    ) -> Result<PipelineOutput> {
        let content = self.current.as_deref().ok_or(HandlingError::NoFileLoaded)?;
        let config = PerturbConfig::try_new(offset_percent, toggles)?;
        self.pipeline.run(content, &config, rng)
    }

    /// [`Session::apply_perturbation`] followed by writing the result to `path`.
    ///
    /// Nothing is written when the session has no file loaded.
    pub fn apply_to_file<R: Rng + ?Sized>(
        &self,
        offset_percent: f64,
        toggles: Toggles,
        rng: &mut R,
        path: &Path,
    ) -> Result<PipelineOutput> {
        let output = self.apply_perturbation(offset_percent, toggles, rng)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HandlingError::io(parent, e))?;
        }
        fs::write(path, &output.text).map_err(|e| HandlingError::io(path, e))?;

        log::info!("{} written", path.display());
        Ok(output)
    }
}
