/*!
# Command-Line Surface

Hand-rolled single-dash argument parsing: this crate's CLI is narrow
enough (eight flags, no subcommands) that reaching for a dedicated
argument-parsing crate would be over-engineering for the surface area.

[`parse_args`] takes the raw `argv` tail (program name already stripped) and
returns either [`CliAction::Help`] (print usage, exit 0) or
[`CliAction::Run`] with a populated [`Config`].
*/

use crate::core::error::MstError;
use crate::core::types::Edge;

/// The MST kernel selected by `-a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Kruskal,
    PrimFibonacci,
    PrimBinary,
    Boruvka,
}

impl Algorithm {
    fn from_number(n: i32) -> Result<Self, MstError> {
        match n {
            0 => Ok(Algorithm::Kruskal),
            1 => Ok(Algorithm::PrimFibonacci),
            2 => Ok(Algorithm::PrimBinary),
            3 => Ok(Algorithm::Boruvka),
            other => Err(MstError::UnknownAlgorithm(other)),
        }
    }

    /// Whether this kernel uses more than rank 0: Prim variants run only
    /// on rank 0, other ranks are no-ops.
    #[must_use]
    pub fn is_distributed(self) -> bool {
        matches!(self, Algorithm::Kruskal | Algorithm::Boruvka)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Kruskal => "kruskal",
            Algorithm::PrimFibonacci => "prim-fibonacci",
            Algorithm::PrimBinary => "prim-binary",
            Algorithm::Boruvka => "boruvka",
        };
        write!(f, "{name}")
    }
}

/// A fully parsed command line, ready to drive the CLI's dispatch loop.
#[derive(Debug, Clone)]
pub struct Config {
    pub algorithm: Algorithm,
    pub columns: usize,
    pub rows: usize,
    pub file_path: String,
    pub new_maze: bool,
    pub render_maze: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::Kruskal,
            columns: 3,
            rows: 2,
            file_path: "maze.csv".to_string(),
            new_maze: false,
            render_maze: false,
            verbose: false,
        }
    }
}

/// What the CLI should do once arguments are parsed.
pub enum CliAction {
    /// `-h` was given: print [`usage`] and exit successfully.
    Help,
    /// Run the engine with this configuration.
    Run(Config),
}

/// Parses `args` (the `argv` tail, program name already stripped).
///
/// An unknown flag produces [`MstError::UnknownFlag`]; a flag that takes a
/// value but is given none, or a value that does not parse as the expected
/// integer, produces [`MstError::MalformedGraphFile`]-shaped input errors
/// via the same unified error type.
pub fn parse_args(args: &[String]) -> Result<CliAction, MstError> {
    let mut config = Config::default();
    let mut i = 0;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" => return Ok(CliAction::Help),
            "-n" => config.new_maze = true,
            "-m" => config.render_maze = true,
            "-v" => config.verbose = true,
            "-a" => config.algorithm = Algorithm::from_number(next_int(args, &mut i, flag)?)?,
            "-c" => config.columns = next_usize(args, &mut i, flag)?,
            "-r" => config.rows = next_usize(args, &mut i, flag)?,
            "-f" => config.file_path = next_value(args, &mut i, flag)?.to_string(),
            other => return Err(MstError::UnknownFlag(other.to_string())),
        }
        i += 1;
    }

    Ok(CliAction::Run(config))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, MstError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| MstError::UnknownFlag(format!("{flag} requires a value")))
}

fn next_int(args: &[String], i: &mut usize, flag: &str) -> Result<i32, MstError> {
    next_value(args, i, flag)?
        .parse()
        .map_err(|_| MstError::UnknownFlag(format!("{flag} requires an integer value")))
}

fn next_usize(args: &[String], i: &mut usize, flag: &str) -> Result<usize, MstError> {
    next_value(args, i, flag)?
        .parse()
        .map_err(|_| MstError::UnknownFlag(format!("{flag} requires a non-negative integer value")))
}

/// The usage block printed by `-h`.
#[must_use]
pub fn usage() -> &'static str {
    "\
Usage: mst-engine [OPTIONS]

  -a N   algorithm: 0 Kruskal (default), 1 Prim/Fibonacci, 2 Prim/Binary, 3 Boruvka
  -c N   columns for maze generation (default 3)
  -r N   rows for maze generation (default 2)
  -f P   graph file path (default maze.csv)
  -n     create a new maze file before solving
  -m     print the MST as a maze after solving
  -v     verbose: print the graph and MST edge lists
  -h     print this help and exit"
}

/// Prints every edge in `edges`, one per line, in the verbose-mode format.
pub fn print_edges(label: &str, edges: &[Edge]) {
    println!("{label}:");
    for edge in edges {
        println!("  {} -- {} (weight {})", edge.from, edge.to, edge.weight);
    }
}
