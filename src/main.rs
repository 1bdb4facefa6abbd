// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use maxclique::io::{read_edges, EnumerationReport, MalformedPolicy, MaximumReport};
use maxclique::{maximum_clique, CliqueEnumerator, Graph, PivotRule, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "maxclique", about = "Find the maximum clique of an edge list")]
struct Cli {
    /// Edge list with one `<node>-<node>` record per line (stdin if omitted)
    input: Option<PathBuf>,
    /// Skip malformed records instead of failing
    #[arg(long)]
    skip_malformed: bool,
    /// Search config file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Branching rule for each search frame
    #[arg(long, value_enum)]
    pivot: Option<PivotArg>,
    /// Split the search across all cores
    #[arg(long)]
    parallel: bool,
    /// Print every maximal clique instead of only the maximum
    #[arg(long)]
    all: bool,
    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PivotArg {
    None,
    MaxDegree,
}

impl From<PivotArg> for PivotRule {
    fn from(arg: PivotArg) -> Self {
        match arg {
            PivotArg::None => PivotRule::None,
            PivotArg::MaxDegree => PivotRule::MaxDegree,
        }
    }
}

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SearchConfig::from_json(&text)?
        }
        None => SearchConfig::default(),
    };
    if let Some(pivot) = cli.pivot {
        config.pivot = pivot.into();
    }
    if cli.parallel {
        config.parallel = true;
    }
    Ok(config)
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the answer.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let policy = if cli.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Reject
    };

    let edges = read_edges(open_input(cli.input.as_ref())?, policy)?;
    let graph = Graph::from_edges(edges);
    let mut out = io::stdout().lock();

    if cli.all {
        let cliques = CliqueEnumerator::with_pivot(&graph, config.pivot).iter();
        if cli.json {
            let report = EnumerationReport {
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                cliques: cliques.collect(),
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        } else {
            for clique in cliques {
                writeln!(out, "{clique}")?;
            }
        }
        return Ok(());
    }

    let clique = maximum_clique(&graph, &config)?;
    if cli.json {
        let report = MaximumReport {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            size: clique.len(),
            clique,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{clique}")?;
    }
    Ok(())
}
