//! Handling Bomb CLI
//!
//! handling.cfg → randomized handling file (default: ohandling.dat)

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use handling_cli::Overrides;
#[cfg(feature = "cli")]
use handling_core::{FieldGroup, ParseMode, DEFAULT_OUTPUT_FILE};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "handling_bomb")]
#[command(about = "Randomize vehicle handling files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Perturb the selected field groups and write a new handling file
    Bomb {
        /// Input handling file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output file path
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        out: PathBuf,

        /// Maximum offset in percent (10 = up to +10%)
        #[arg(long)]
        offset: Option<f64>,

        /// Perturb drive force
        #[arg(long)]
        driveforce: bool,

        /// Perturb brake force
        #[arg(long)]
        brakeforce: bool,

        /// Perturb traction curve min
        #[arg(long)]
        traction: bool,

        /// Perturb max velocity
        #[arg(long)]
        max_velocity: bool,

        /// Perturb drag (inverse-scaled)
        #[arg(long)]
        drag: bool,

        /// Perturb every field group
        #[arg(long)]
        all: bool,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Fail on malformed records instead of skipping them
        #[arg(long, default_value = "false")]
        strict: bool,

        /// Run config JSON file; flags above take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output run summary JSON file
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Parse a handling file and report what was found
    Inspect {
        /// Input handling file path
        #[arg(long)]
        r#in: PathBuf,

        /// Fail on malformed records instead of skipping them
        #[arg(long, default_value = "false")]
        strict: bool,

        /// Print parsed vehicles as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bomb {
            r#in,
            out,
            offset,
            driveforce,
            brakeforce,
            traction,
            max_velocity,
            drag,
            all,
            seed,
            strict,
            config,
            summary,
        } => {
            let flags = [
                (FieldGroup::DriveForce, driveforce),
                (FieldGroup::BrakeForce, brakeforce),
                (FieldGroup::Traction, traction),
                (FieldGroup::MaxVelocity, max_velocity),
                (FieldGroup::Drag, drag),
            ];
            let overrides = Overrides {
                offset_percent: offset,
                enable: flags
                    .into_iter()
                    .filter(|(_, on)| all || *on)
                    .map(|(group, _)| group)
                    .collect(),
                seed,
                strict,
            };
            let run_config = handling_cli::resolve_config(config.as_deref(), &overrides)?;

            println!("💣 Perturbing handling file...");
            println!("   Input:   {}", r#in.display());
            println!("   Output:  {}", out.display());
            println!("   Offset:  {}%", run_config.offset_percent);
            println!(
                "   Groups:  {}",
                run_config
                    .toggles
                    .enabled()
                    .map(|g| g.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let meta = handling_cli::bomb(&r#in, &out, &run_config)?;

            println!("\n✅ {} written", out.display());
            println!(
                "   Vehicles: {} (skipped: {}, defaulted fields: {})",
                meta.parse_stats.parsed,
                meta.parse_stats.skipped_short,
                meta.parse_stats.defaulted_fields
            );
            println!("   Opaque lines: {}", meta.parse_stats.opaque_lines);
            println!(
                "   Field applications: {}",
                meta.perturb_stats.total_applications()
            );

            if let Some(summary_path) = summary {
                handling_cli::save_summary(&summary_path, &meta)?;
                println!("\n📄 Summary saved to: {}", summary_path.display());
            }
        }

        Commands::Inspect { r#in, strict, json } => {
            let mode = if strict {
                ParseMode::Strict
            } else {
                ParseMode::Permissive
            };
            let doc = handling_cli::inspect(&r#in, mode)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&doc.vehicles)?);
            } else {
                println!("🔍 {}", r#in.display());
                println!("   Lines:          {}", doc.stats.total_lines);
                println!("   Vehicles:       {}", doc.stats.parsed);
                println!("   Opaque lines:   {}", doc.stats.opaque_lines);
                println!("   Blank/comments: {}", doc.stats.empty_lines);
                println!("   Skipped short:  {}", doc.stats.skipped_short);
                println!("   Defaulted:      {}", doc.stats.defaulted_fields);
                for vehicle in &doc.vehicles {
                    println!("   - {}", vehicle.name);
                }
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("handling_bomb CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
