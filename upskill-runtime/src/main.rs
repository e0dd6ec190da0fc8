mod report;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, Command};
use serde::de::DeserializeOwned;
use std::{fs, io::Read, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use upskill_algorithms::knapsack::solve_challenge;
use upskill_challenges::allocation::{Candidate, Challenge, Instance, Selection};
use upskill_structs::config::{EngineConfig, GeneratorConfig};
use upskill_utils::{compress_obj, decompress_obj, dejsonify, jsonify, seed_from_str};

fn cli() -> Command {
    Command::new("upskill")
        .about("Selects the training allocation with the highest strategic value within an hour budget")
        .arg_required_else_help(true)
        .arg(
            arg!(-v --verbose "Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a synthetic instance")
                .arg(
                    arg!(<SEED> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--nonce [NONCE] "Selects one of the instances derived from SEED")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--config [CONFIG] "Generator config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the instance will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("optimize")
                .about("Computes the optimal selection for an instance")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--config [CONFIG] "Engine config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the selection will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress "If output file is set, the selection will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a selection against an instance")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SELECTION> "Selection json string, path to json or zlib file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Optimizes an instance and prints a report")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--config [CONFIG] "Engine config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--head [HEAD] "Number of candidates to preview in input order")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--top [TOP] "Number of highest-value candidates to preview")
                        .default_value("5")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("generate", sub_m)) => generate(
            sub_m.get_one::<String>("SEED").unwrap(),
            *sub_m.get_one::<u64>("nonce").unwrap(),
            sub_m.get_one::<String>("config"),
            sub_m.get_one::<PathBuf>("output"),
        ),
        Some(("optimize", sub_m)) => optimize(
            sub_m.get_one::<String>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("config"),
            sub_m.get_one::<PathBuf>("output"),
            sub_m.get_flag("compress"),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<String>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("SELECTION").unwrap(),
        ),
        Some(("report", sub_m)) => report(
            sub_m.get_one::<String>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("config"),
            *sub_m.get_one::<usize>("head").unwrap(),
            *sub_m.get_one::<usize>("top").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

pub fn generate(
    seed: &str,
    nonce: u64,
    config: Option<&String>,
    output_file: Option<&PathBuf>,
) -> Result<()> {
    let config: GeneratorConfig = load_config(config)?;
    let instance = Instance::generate(&seed_from_str(seed, nonce), &config)?;
    info!(
        num_candidates = instance.candidates.len(),
        capacity = instance.capacity,
        "generated instance"
    );
    write_output(output_file, jsonify(&instance)?.into_bytes())
}

pub fn optimize(
    instance: &str,
    config: Option<&String>,
    output_file: Option<&PathBuf>,
    compress: bool,
) -> Result<()> {
    let instance: Instance = load_json(instance, "instance")?;
    let config: EngineConfig = load_config(config)?;
    let selection = compute_selection(&instance, &config)?;

    let output = match output_file {
        Some(_) if compress => compress_obj(&selection)?,
        _ => jsonify(&selection)?.into_bytes(),
    };
    write_output(output_file, output)
}

pub fn verify(instance: &str, selection: &str) -> Result<()> {
    if instance == "-" && selection == "-" {
        return Err(anyhow!("Only one of INSTANCE and SELECTION can be read from stdin"));
    }
    let instance: Instance = load_json(instance, "instance")?;
    let selection: Selection = load_json(selection, "selection")?;
    let challenge = Challenge::try_from(&instance)?;

    let total_value = challenge
        .verify_selection(&selection)
        .map_err(|e| anyhow!("Invalid selection: {}", e))?;
    println!("Selection is valid (value {})", total_value);
    Ok(())
}

pub fn report(instance: &str, config: Option<&String>, head: usize, top: usize) -> Result<()> {
    let instance: Instance = load_json(instance, "instance")?;
    let config: EngineConfig = load_config(config)?;

    let first: Vec<&Candidate> = instance.candidates.iter().take(head).collect();
    print!(
        "{}",
        report::render_preview("First candidates", &first, instance.candidates.len())
    );

    let ordered = report::by_value(&instance.candidates);
    let top = &ordered[ordered.len().saturating_sub(top)..];
    print!(
        "{}",
        report::render_preview("Highest-value candidates", top, ordered.len())
    );

    let selection = compute_selection(&instance, &config)?;
    print!("{}", report::render(&instance, &selection));
    Ok(())
}

fn compute_selection(instance: &Instance, config: &EngineConfig) -> Result<Selection> {
    let challenge = Challenge::try_from(instance)?;
    let selection = solve_challenge(&challenge, config)?;
    info!(
        best_value = %selection.best_value,
        num_selected = selection.selected.len(),
        "optimized instance"
    );
    Ok(selection)
}

fn read_input(input: &str, what: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        Ok(buffer)
    } else if input.ends_with(".json") {
        fs::read_to_string(input).with_context(|| format!("Failed to read {} file: {}", what, input))
    } else {
        Ok(input.to_string())
    }
}

/// Loads `T` from a JSON string, `-`, a `.json` file, or a `.zlib` file written by
/// `optimize --compress`.
fn load_json<T: DeserializeOwned>(input: &str, what: &str) -> Result<T> {
    if input.ends_with(".zlib") {
        let bytes =
            fs::read(input).with_context(|| format!("Failed to read {} file: {}", what, input))?;
        return decompress_obj(&bytes).with_context(|| format!("Failed to decompress {}", what));
    }
    let json_str = read_input(input, what)?;
    dejsonify::<T>(&json_str).with_context(|| format!("Failed to parse {}", what))
}

fn load_config<T: DeserializeOwned + Default>(config: Option<&String>) -> Result<T> {
    match config {
        Some(config) => load_json(config, "config"),
        None => Ok(T::default()),
    }
}

fn write_output(output_file: Option<&PathBuf>, output: Vec<u8>) -> Result<()> {
    match output_file {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("saved output to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", String::from_utf8_lossy(&output));
            Ok(())
        }
    }
}
