//! Dragoman schema compiler
//!
//! Builds the type graph of a schema file and its required modules.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use dragoman::feedback::graph::GraphSnapshot;
use dragoman::{Registry, Session, SessionConfig};

/// Dragoman schema compiler
#[derive(Parser, Debug)]
#[command(name = "dgc")]
#[command(version = "0.1.0")]
#[command(about = "Dragoman schema compiler - builds and checks a type graph")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root schema file (.dgl)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Additional directory to search for required modules
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Never offer typo fixes
    #[arg(long)]
    no_fix: bool,

    /// Print the type graph as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a schema file for errors
    Check {
        /// Root schema file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Check { input }) => check_file(input, &cli),
        Some(Commands::Version) => {
            println!("dgc 0.1.0");
            println!("Dragoman schema compiler");
            return;
        }
        None => match &cli.input {
            Some(input) => compile_file(input, &cli),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: dgc [-I DIR]... <FILE> or dgc check <FILE>");
                process::exit(1);
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// `--no-fix` turns the prompt off, which declines every fix
fn config_for(cli: &Cli) -> SessionConfig {
    SessionConfig {
        include_dirs: cli.include.clone(),
        interactive: !cli.no_fix,
        ..SessionConfig::default()
    }
}

/// Run a session over `input`. Returns whether it succeeded.
fn run(input: &Path, cli: &Cli) -> (Session, bool) {
    log::info!("Compiling {}", input.display());

    let mut session = Session::new(config_for(cli));
    let ok = session.compile(input).is_ok();
    eprintln!("{}", session.diagnostics.summary());
    (session, ok)
}

/// Compile a schema file and print its type graph
fn compile_file(input: &Path, cli: &Cli) -> anyhow::Result<bool> {
    let (session, ok) = run(input, cli);
    if !ok {
        return Ok(false);
    }

    let registry = session.finish();
    if cli.json {
        let json = GraphSnapshot::from_registry(&registry)
            .to_json()
            .context("serializing type graph")?;
        println!("{}", json);
    } else {
        print_listing(&registry);
    }

    Ok(true)
}

/// Check a schema file for errors without printing the graph
fn check_file(input: &Path, cli: &Cli) -> anyhow::Result<bool> {
    let (_, ok) = run(input, cli);
    if ok {
        println!("No errors found in {}", input.display());
    }
    Ok(ok)
}

fn print_listing(registry: &Registry) {
    println!("Enums:");
    for (def, enumeration) in registry.enums() {
        println!("- {} ({})", def.name, registry.name_of(enumeration.base));
        for entry in enumeration.entries() {
            println!("    {} = {}", entry.name, entry.tag);
        }
    }

    println!("Objects:");
    for (def, object) in registry.objects() {
        println!("- {}", def.name);
        for entry in object.entries() {
            println!("    {} [{}]: {}", entry.name, entry.tag, registry.display(&entry.ty));
        }
    }

    println!("Polymorphs:");
    for (def, poly) in registry.polymorphs() {
        println!(
            "- {} on {} [{}]: {}",
            def.name,
            poly.discriminant,
            poly.discriminant_tag,
            registry.name_of(poly.enum_type)
        );
        for case in poly.cases.values() {
            println!("    {} -> {}", case.name, registry.name_of(case.ty));
        }
        for shared in poly.shared.values() {
            println!("    shared {} [{}]: {}", shared.name, shared.tag, registry.display(&shared.ty));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::try_parse_from(["dgc", "--no-fix", "-I", "inc", "--include", "lib", "main.dgl"]).unwrap();
        let config = config_for(&cli);

        assert!(!config.interactive);
        assert_eq!(config.include_dirs, vec![PathBuf::from("inc"), PathBuf::from("lib")]);
        assert_eq!(config.extension, "dgl");
        assert_eq!(cli.input, Some(PathBuf::from("main.dgl")));

        let cli = Cli::try_parse_from(["dgc", "check", "main.dgl"]).unwrap();
        assert!(config_for(&cli).interactive);
        assert!(matches!(cli.command, Some(Commands::Check { .. })));
    }
}
