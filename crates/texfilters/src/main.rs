/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! texfilters - Pandoc JSON filter for LaTeX output

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use texfilters::readers;
use texfilters::transforms::heading_labels::MAX_DEPTH;
use texfilters::writers;
use texfilters::{FilterOptions, FilterSpec, apply_filters};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "texfilters")]
#[command(version)]
#[command(about = "Pandoc JSON filter: tables as tabu LaTeX, section labels for headings")]
struct Args {
    /// Output format, passed by pandoc as the first argument
    #[arg(env = "TEXFILTERS_FORMAT", default_value = "latex")]
    format: String,

    /// Filter to run (tables, headings); repeat or comma-separate to run
    /// several, in order
    #[arg(
        short = 'F',
        long = "filter",
        env = "TEXFILTERS_FILTER",
        value_delimiter = ',',
        action = clap::ArgAction::Append,
        default_value = "tables"
    )]
    filters: Vec<FilterSpec>,

    /// Deepest heading level that stays numbered
    #[arg(long = "depth", env = "TEXFILTERS_HEADING_DEPTH", value_parser = parse_depth)]
    depth: Option<usize>,

    /// Keep heading identifiers instead of replacing them with section labels
    #[arg(long = "no-renumber")]
    no_renumber: bool,

    #[arg(short = 'i', long = "input", default_value = "-")]
    input: String,

    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Pass the document through untouched unless the format is latex or beamer
    #[arg(long = "only-latex")]
    only_latex: bool,
}

fn parse_depth(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => Ok(depth),
        _ => Err(format!("`{}` is not a heading level between 1 and {}", s, MAX_DEPTH)),
    }
}

impl Args {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            format: self.format.clone(),
            filters: self.filters.clone(),
            heading_depth: self.depth,
            renumber: if self.no_renumber { Some(false) } else { None },
            only_latex: self.only_latex,
        }
    }
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if input == "-" {
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read document from stdin")?;
    } else {
        buf = std::fs::read(input).with_context(|| format!("failed to read {}", input))?;
    }
    Ok(buf)
}

fn main() -> Result<()> {
    // stdout carries the document, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texfilters=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let options = args.filter_options();
    tracing::debug!(?options, "resolved options");

    let input = read_input(&args.input)?;
    let mut doc = readers::json::read(&mut input.as_slice()).context("failed to read document")?;
    if let Some((major, minor)) = doc.api_version() {
        tracing::debug!(major, minor, "pandoc-types API version");
    }

    let diagnostics = apply_filters(&mut doc, &options).context("failed to apply filters")?;
    tracing::debug!(count = diagnostics.len(), "filters finished");

    let mut output = Vec::new();
    writers::json::write(&doc, &mut output).context("failed to serialize document")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("failed to write {}", path))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&output)
                .and_then(|()| stdout.flush())
                .context("failed to write document to stdout")?;
        }
    }
    Ok(())
}
