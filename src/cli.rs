//! CLI driver of `pgsgen`.

use crate::{counts::CountOverrides, error::Error, gen, parser::Schema};
use clap::Parser;
use data_encoding::{DecodeError, DecodeKind, HEXLOWER_PERMISSIVE};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
};

/// Arguments to the `pgsgen` CLI program.
#[derive(Parser, Debug)]
#[command(
    name = "pgsgen",
    version,
    about = "Generate random Cypher CREATE statements from a PG-Schema definition"
)]
pub struct Args {
    /// File containing the PG-Schema definition.
    pub schema: PathBuf,

    /// Default number of nodes per label, for labels absent from the counts file.
    #[arg(short = 'n', long = "nodes", default_value_t = 4)]
    pub nodes: u64,

    /// Default number of relationships per label, for labels absent from the counts file.
    #[arg(short = 'e', long = "edges", default_value_t = 4)]
    pub edges: u64,

    /// CSV file with per-label instance counts (e.g. "PostType,12").
    #[arg(short = 'c', long = "counts")]
    pub counts: Option<PathBuf>,

    /// Random number generator seed (should have 64 hex digits).
    #[arg(short = 's', long = "seed", value_parser = seed_from_str)]
    pub seed: Option<<StdRng as SeedableRng>::Seed>,
}

/// Parses a 64-digit hex string into an RNG seed.
pub(crate) fn seed_from_str(s: &str) -> Result<<StdRng as SeedableRng>::Seed, DecodeError> {
    let mut seed = <StdRng as SeedableRng>::Seed::default();

    if HEXLOWER_PERMISSIVE.decode_len(s.len())? != seed.len() {
        return Err(DecodeError {
            position: s.len(),
            kind: DecodeKind::Length,
        });
    }
    match HEXLOWER_PERMISSIVE.decode_mut(s.as_bytes(), &mut seed) {
        Ok(_) => Ok(seed),
        Err(e) => Err(e.error),
    }
}

/// Runs the CLI program, printing both statement sections to stdout.
pub fn run(args: &Args) -> Result<(), Error> {
    let stdout = io::stdout();
    generate(args, &mut stdout.lock())
}

/// Parses the schema, resolves counts, generates node and relationship
/// statements, and writes the two labeled sections to `out`.
pub fn generate(args: &Args, out: &mut dyn Write) -> Result<(), Error> {
    let input = read_to_string(&args.schema).map_err(|source| Error::ReadSchema {
        path: args.schema.clone(),
        source,
    })?;
    let schema = Schema::parse(&input);

    let counts = match &args.counts {
        Some(path) => CountOverrides::from_csv_path(path),
        None => CountOverrides::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::from_seed(seed),
        None => StdRng::from_entropy(),
    };

    let nodes = gen::generate_nodes(&schema, &counts, args.nodes, &mut rng);
    let relationships = gen::generate_relationships(&schema, &nodes, &counts, args.edges, &mut rng);

    writeln!(out, "-- Cypher CREATE statements for nodes --")?;
    for statement in &nodes.statements {
        writeln!(out, "{}", statement)?;
    }
    writeln!(out, "-- Cypher CREATE statements for relationships --")?;
    for statement in &relationships {
        writeln!(out, "{}", statement)?;
    }
    Ok(())
}
