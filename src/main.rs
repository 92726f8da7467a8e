//! zotsearch CLI: build, query, and inspect catalog search indexes.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zotsearch::build::fetch::load_caches;
use zotsearch::build::{build_index, save_index};
use zotsearch::{load_index, EntityType, SearchEngine, SearchOptions};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,zotsearch=info",
        1 => "info,zotsearch=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            cache_dir,
            output,
            remote,
        } => run_build(&cache_dir, &output, &remote),
        Commands::Search {
            index,
            query,
            limit,
            types,
            json,
        } => run_search(&index, &query, limit, &types, json),
        Commands::Repl { index } => run_repl(&index),
        Commands::Inspect { index } => run_inspect(&index),
    }
}

fn run_build(cache_dir: &str, output: &str, remote: &str) -> anyhow::Result<()> {
    let (courses, instructors) =
        load_caches(Path::new(cache_dir), remote).context("loading caches")?;
    let index = build_index(&courses, &instructors);
    save_index(&index, Path::new(output)).context("writing index artifact")?;
    display::print_summary(&index);
    Ok(())
}

fn run_search(
    index_path: &str,
    query: &str,
    limit: usize,
    types: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let mut engine = SearchEngine::new();
    engine
        .init_from_path(Path::new(index_path))
        .context("loading index artifact")?;

    let mut options = SearchOptions::default().with_num_results(limit);
    if !types.is_empty() {
        let parsed = types
            .iter()
            .map(|t| parse_entity_type(t))
            .collect::<anyhow::Result<Vec<_>>>()?;
        options = options.with_result_types(parsed);
    }

    let hits = engine.search(query, &options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        display::print_hits(&hits);
    }
    Ok(())
}

fn run_repl(index_path: &str) -> anyhow::Result<()> {
    let mut engine = SearchEngine::new();
    let started = Instant::now();
    engine
        .init_from_path(Path::new(index_path))
        .context("loading index artifact")?;
    eprintln!("initialization took {:.1?}", started.elapsed());
    eprintln!("enter a query, or :q to quit");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("query> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == ":q" || query == ":quit" {
            break;
        }
        let timer = Instant::now();
        match engine.search(query, &SearchOptions::default().with_num_results(10)) {
            Ok(hits) => {
                display::print_hits(&hits);
                eprintln!("query took {:.1?}", timer.elapsed());
            }
            Err(err) => eprintln!("error: {err}"),
        }
    }
    Ok(())
}

fn run_inspect(index_path: &str) -> anyhow::Result<()> {
    let index = load_index(Path::new(index_path)).context("loading index artifact")?;
    display::print_summary(&index);
    Ok(())
}

fn parse_entity_type(raw: &str) -> anyhow::Result<EntityType> {
    match raw.to_uppercase().as_str() {
        "GE_CATEGORY" | "GE" => Ok(EntityType::GeCategory),
        "DEPARTMENT" => Ok(EntityType::Department),
        "COURSE" => Ok(EntityType::Course),
        "INSTRUCTOR" => Ok(EntityType::Instructor),
        other => anyhow::bail!(
            "unknown entity type '{other}' (expected GE_CATEGORY, DEPARTMENT, COURSE, or INSTRUCTOR)"
        ),
    }
}
