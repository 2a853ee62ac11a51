use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use pbwt_rs::index::{IndexMeta, PbwtIndex};
use pbwt_rs::io;
use pbwt_rs::report::{self, MatchOpt};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "pbwt-rs",
    author,
    version,
    about = "PBWT haplotype matcher",
    arg_required_else_help = true
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors and skip the per-match console listing
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the PBWT of a haplotype table and save it as <output>.pbwt
    Index {
        /// Haplotype table, .csv or .xlsx (header row, ID column, then 0/1 sites)
        input: String,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "haps")]
        output: String,
    },
    /// Build the PBWT of a haplotype table and report long matches
    Match {
        /// Haplotype table, .csv or .xlsx (header row, ID column, then 0/1 sites)
        input: String,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Report long matches from a saved index
    Report {
        /// Path to PBWT index (.pbwt)
        #[arg(short = 'i', long = "index")]
        index: String,
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Minimum match length in sites
    min_length: usize,
    /// Output CSV path (default: pbwt_matches_minL<min_length>.csv)
    #[arg(short, long)]
    out: Option<String>,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.command {
        Commands::Index { input, output } => run_index(&input, &output),
        Commands::Match { input, report } => run_match(&input, report, cli.quiet),
        Commands::Report { index, report } => run_report(&index, report, cli.quiet),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_index_from_table(input: &str) -> Result<(PbwtIndex, Vec<String>)> {
    let table = io::haplotypes::read_haplotypes_from_path(input)
        .with_context(|| format!("cannot load haplotypes from '{}'", input))?;
    println!("input: {}", input);
    println!("haplotypes: {}", table.matrix.n_haps());
    println!("sites: {}", table.matrix.n_sites());
    Ok((PbwtIndex::build(&table.matrix), table.ids))
}

fn run_index(input: &str, output: &str) -> Result<()> {
    let (mut index, ids) = build_index_from_table(input)?;
    index.set_meta(IndexMeta {
        input_file: Some(input.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
        haplotype_ids: ids,
    });

    let out_path = format!("{}.pbwt", output);
    index
        .save_to_file(&out_path)
        .with_context(|| format!("cannot write index to '{}'", out_path))?;
    println!("PBWT index saved: {}", out_path);
    Ok(())
}

fn run_match(input: &str, args: ReportArgs, quiet: bool) -> Result<()> {
    let (index, ids) = build_index_from_table(input)?;
    emit_matches(&index, &ids, args, quiet)
}

fn run_report(index_path: &str, args: ReportArgs, quiet: bool) -> Result<()> {
    let index = PbwtIndex::load_from_file(index_path)
        .with_context(|| format!("cannot load PBWT index '{}'", index_path))?;
    let ids: &[String] = match index.meta() {
        Some(meta) => {
            info!(
                "index built from {:?} at {:?}",
                meta.input_file.as_deref().unwrap_or("?"),
                meta.build_timestamp.as_deref().unwrap_or("?")
            );
            &meta.haplotype_ids
        }
        None => &[],
    };
    println!("haplotypes: {}", index.n_haps());
    println!("sites: {}", index.n_sites());
    emit_matches(&index, ids, args, quiet)
}

fn emit_matches(index: &PbwtIndex, ids: &[String], args: ReportArgs, quiet: bool) -> Result<()> {
    let opt = MatchOpt {
        min_length: args.min_length,
        threads: args.threads,
    };
    println!("min_length: {}", opt.min_length);
    let matches = report::report_with_opt(index, opt).context("match reporting failed")?;

    if matches.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    let out_path = args
        .out
        .unwrap_or_else(|| io::matches::default_output_name(opt.min_length));
    io::matches::write_matches_to_path(&out_path, &matches)
        .with_context(|| format!("cannot write matches to '{}'", out_path))?;
    println!("Found {} matches. Results: {}", matches.len(), out_path);

    if !quiet {
        for m in &matches {
            println!("{}", io::matches::describe_match(m, ids));
        }
    }
    Ok(())
}
