//! # handling_core - Vehicle handling file perturbation
//!
//! Reads a line-oriented vehicle handling file, applies bounded random
//! jitter to selected field groups and writes it back in the same layout.
//!
//! ## Pipeline
//! - [`classify`]: blank/comment, opaque (other record families) or candidate
//! - [`parser`]: candidate lines → [`Vehicle`] records
//! - [`perturb`]: multiplicative jitter on the toggled groups
//! - [`serializer`]: records, then opaque lines
//!
//! ```no_run
//! use handling_core::{seeded_rng, Session, Toggles};
//!
//! let mut session = Session::new();
//! session.load_file(std::fs::read_to_string("handling.cfg").unwrap());
//! let out = session
//!     .apply_perturbation(10.0, Toggles::all(), &mut seeded_rng(Some(42)))
//!     .unwrap();
//! println!("{}", out.text);
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod parser;
pub mod perturb;
pub mod pipeline;
pub mod schema;
pub mod serializer;
pub mod session;

pub use classify::{classify, LineKind};
pub use config::RunConfig;
pub use error::{ErrorKind, HandlingError, Result};
pub use parser::{parse_document, ParseMode, ParseStats, ParsedDocument};
pub use perturb::{perturb, seeded_rng, FieldGroup, PerturbConfig, PerturbStats, Toggles};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput};
pub use schema::{FieldValue, Vehicle, FIELD_NAMES};
pub use serializer::{format_vehicle, write_document};
pub use session::{Session, DEFAULT_OUTPUT_FILE};
