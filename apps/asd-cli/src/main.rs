mod error;

use asd_core::Real;
use asd_model::{MonomerInfo, Polymer, PolymerType};
use asd_project::{
    StudyModel, SystemReport, build_study, load_study, study_reports, system_report,
};
use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asd-cli")]
#[command(about = "ASD Screener CLI - amorphous solid dispersion property tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a study file and build its systems
    Validate {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
    },
    /// List APIs, polymers and systems in a study
    List {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
    },
    /// Show derived quantities for one system
    Show {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
        /// System ID
        system_id: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show derived quantities for every system
    Report {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate a copolymer Tg with the Fox equation
    Fox {
        /// Repeat unit as name:mole_fraction:molecular_weight:tg_homopolymer_c
        #[arg(short, long = "monomer", value_parser = parse_monomer, required = true)]
        monomers: Vec<MonomerInfo>,
        /// Polymer type label
        #[arg(long = "type", default_value = "Copolymer-Random")]
        polymer_type: String,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::List { study_path } => cmd_list(&study_path),
        Commands::Show {
            study_path,
            system_id,
            json,
        } => cmd_show(&study_path, &system_id, json),
        Commands::Report { study_path, json } => cmd_report(&study_path, json),
        Commands::Fox {
            monomers,
            polymer_type,
        } => cmd_fox(monomers, &polymer_type),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_monomer(s: &str) -> Result<MonomerInfo, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [name, x, mw, tg] = parts.as_slice() else {
        return Err(format!(
            "expected name:mole_fraction:molecular_weight:tg_homopolymer_c, got '{s}'"
        ));
    };
    let number = |field: &str, v: &str| -> Result<Real, String> {
        v.trim()
            .parse::<Real>()
            .map_err(|e| format!("invalid {field} '{v}': {e}"))
    };
    Ok(MonomerInfo::new(name.trim())
        .with_mole_fraction(number("mole_fraction", *x)?)
        .with_molecular_weight(number("molecular_weight", *mw)?)
        .with_tg_homopolymer_celsius(number("tg_homopolymer_c", *tg)?))
}

fn load_model(study_path: &Path) -> CliResult<StudyModel> {
    debug!(path = %study_path.display(), "loading study");
    let study = load_study(study_path)?;
    Ok(build_study(&study)?)
}

fn cmd_validate(study_path: &Path) -> CliResult<()> {
    println!("Validating study: {}", study_path.display());
    let model = load_model(study_path)?;
    println!(
        "✓ Study is valid ({} APIs, {} polymers, {} systems)",
        model.apis.len(),
        model.polymers.len(),
        model.systems.len()
    );
    Ok(())
}

fn cmd_list(study_path: &Path) -> CliResult<()> {
    let model = load_model(study_path)?;

    println!("Study: {}", model.name);
    println!("\nAPIs:");
    for (id, api) in &model.apis {
        println!("  {}  {}", id, api);
    }
    println!("\nPolymers:");
    for (id, polymer) in &model.polymers {
        println!("  {}  {}", id, polymer);
    }
    println!("\nSystems:");
    if model.systems.is_empty() {
        println!("  (none)");
    }
    for (id, system) in &model.systems {
        println!("  {}  {}", id, system);
    }
    Ok(())
}

fn cmd_show(study_path: &Path, system_id: &str, json: bool) -> CliResult<()> {
    let model = load_model(study_path)?;
    let system = model
        .system(system_id)
        .ok_or_else(|| CliError::SystemNotFound(system_id.to_string()))?;

    let report = system_report(system_id, system);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn cmd_report(study_path: &Path, json: bool) -> CliResult<()> {
    let model = load_model(study_path)?;
    let reports = study_reports(&model);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{:<20} {:<16} {:<16} {:>8} {:>10} {:>10} {:>10}",
        "system", "api", "polymer", "load%", "phi_api", "Tg_pol[K]", "dTg[K]"
    );
    for r in &reports {
        println!(
            "{:<20} {:<16} {:<16} {:>8.1} {:>10} {:>10} {:>10}",
            r.id,
            r.api.name,
            r.polymer.name,
            r.drug_load_wt_percent,
            fmt_opt(r.volume_fraction_api, 4),
            fmt_opt(r.polymer.tg_kelvin, 2),
            fmt_opt(r.tg_gap_k, 2),
        );
    }
    Ok(())
}

fn cmd_fox(monomers: Vec<MonomerInfo>, polymer_type: &str) -> CliResult<()> {
    debug!(units = monomers.len(), polymer_type, "estimating Fox Tg");
    let polymer = Polymer::builder("cli")
        .polymer_type(PolymerType::from(polymer_type))
        .monomers(monomers)
        .build()?;

    match polymer.tg_kelvin() {
        Some(tg_k) => {
            println!("Fox Tg: {:.2} K", tg_k);
            if let Some(tg_c) = polymer.tg_celsius() {
                println!("        {:.2} °C", tg_c);
            }
        }
        None => println!("Fox Tg: unavailable (needs a copolymer with ≥2 fully specified units)"),
    }
    Ok(())
}

fn print_report(r: &SystemReport) {
    println!("{}", r.summary);
    println!("  {}", r.api.summary);
    println!("  {}", r.polymer.summary);
    println!("\nComposition:");
    println!("  Drug load:        {:.2} wt%", r.drug_load_wt_percent);
    println!("  Drug fraction:    {:.4}", r.drug_load_frac);
    println!("  Polymer fraction: {:.4}", r.polymer_load_frac);
    println!("  API vol. frac.:   {}", fmt_opt(r.volume_fraction_api, 4));

    println!("\nGlass transition:");
    println!("  API Tg:           {} K", fmt_opt(r.api.tg_kelvin, 2));
    println!("  Polymer Tg:       {} K", fmt_opt(r.polymer.tg_kelvin, 2));
    if let Some(origin) = r.polymer.tg_origin {
        println!("  Polymer Tg from:  {:?}", origin);
    }
    println!("  Tg gap:           {} K", fmt_opt(r.tg_gap_k, 2));
    println!("  Polymer PDI:      {}", fmt_opt(r.polymer.pdi, 2));

    if !r.risk_flags.is_empty() {
        println!("\nRisk flags:");
        for flag in &r.risk_flags {
            println!("  - {}", flag);
        }
    }
}

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_monomer_arg() {
        let m = parse_monomer("B:0.5:150:-20").unwrap();
        assert_eq!(m.name, "B");
        assert_eq!(m.mole_fraction, 0.5);
        assert_eq!(m.molecular_weight, Some(150.0));
        assert_eq!(m.tg_homopolymer_celsius, Some(-20.0));
    }

    #[test]
    fn rejects_malformed_monomer_arg() {
        assert!(parse_monomer("B:0.5:150").is_err());
        assert!(parse_monomer("B:half:150:-20").is_err());
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(fmt_opt(Some(1.23456), 2), "1.23");
        assert_eq!(fmt_opt(None, 2), "n/a");
    }

    #[test]
    fn cli_parses_fox_command() {
        let cli = Cli::try_parse_from([
            "asd-cli",
            "fox",
            "--monomer",
            "A:0.5:100:80",
            "--monomer",
            "B:0.5:150:-20",
        ])
        .unwrap();
        match cli.command {
            Commands::Fox {
                monomers,
                polymer_type,
            } => {
                assert_eq!(monomers.len(), 2);
                assert_eq!(polymer_type, "Copolymer-Random");
            }
            _ => panic!("expected fox command"),
        }
    }
}
