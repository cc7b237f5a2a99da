//! `crossmatch run`: cross-match, Monte Carlo null, significance report

use crate::cli::{Cli, OutputFormat, RunArgs};
use anyhow::Context;
use celestial_crossmatch::{
    read_catalog_csv, sample_catalogs, write_matches, write_matches_csv, Analysis, AnalysisConfig,
    AnalysisReport, AnalysisSummary, Catalog, CatalogRole, HistogramBin, MatchRow,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::atomic::AtomicBool;

const HISTOGRAM_WIDTH: usize = 40;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: AnalysisSummary,
    matches: Vec<MatchRow<'a>>,
    histogram: Vec<HistogramBin>,
}

pub fn run(args: &RunArgs, _cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(args)?;
    let analysis = Analysis::new(config).context("Invalid analysis configuration")?;
    let (primary, secondary) = load_catalogs(args)?;

    let pb = create_progress_bar(analysis.config().monte_carlo_iterations as u64);
    let report = analysis
        .run_with(&primary, &secondary, &AtomicBool::new(false), |_| pb.inc(1))
        .context("Analysis failed")?;
    pb.finish_and_clear();

    if let Some(path) = &args.output {
        write_matches_csv(path, &report.matches)
            .with_context(|| format!("Failed to write matches to {:?}", path))?;
    }

    match args.format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => print_json(&report),
        OutputFormat::Csv => {
            write_matches(io::stdout().lock(), &report.matches)?;
            Ok(())
        }
    }
}

fn build_config(args: &RunArgs) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => AnalysisConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.search_radius_arcmin = radius;
    }
    if let Some(iterations) = args.iterations {
        config.monte_carlo_iterations = iterations;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(metric) = args.metric {
        config.null_metric = metric.into();
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(bins) = args.bins {
        config.histogram_bins = bins;
    }
    Ok(config)
}

fn load_catalogs(args: &RunArgs) -> anyhow::Result<(Catalog, Catalog)> {
    if args.sample {
        let sample = sample_catalogs(args.sample_seed)?;
        log::info!(
            "using sample catalogs (seed {}, {} planted associations)",
            args.sample_seed,
            sample.planted.len()
        );
        return Ok((sample.primary, sample.secondary));
    }
    match (&args.primary, &args.secondary) {
        (Some(p), Some(s)) => {
            let primary = read_catalog_csv(p, CatalogRole::Primary)
                .with_context(|| format!("Failed to read primary catalog {:?}", p))?;
            let secondary = read_catalog_csv(s, CatalogRole::Secondary)
                .with_context(|| format!("Failed to read secondary catalog {:?}", s))?;
            Ok((primary, secondary))
        }
        _ => anyhow::bail!("Provide --primary and --secondary, or --sample"),
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Monte Carlo [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

fn print_table(report: &AnalysisReport) -> anyhow::Result<()> {
    let summary = report.summary();
    let mut out = io::stdout().lock();

    writeln!(out, "=== Cross-Match Results ===")?;
    writeln!(
        out,
        "Catalogs:        {} primary, {} secondary",
        summary.primary_size, summary.secondary_size
    )?;
    writeln!(
        out,
        "Search radius:   {} arcmin ({} strategy)",
        summary.search_radius_arcmin, summary.strategy
    )?;
    writeln!(out, "Matches found:   {}", summary.match_count)?;
    match summary.match_rate {
        Some(rate) => writeln!(out, "Match rate:      {:.1}%", rate * 100.0)?,
        None => writeln!(out, "Match rate:      n/a (empty primary catalog)")?,
    }
    writeln!(out)?;

    writeln!(out, "=== Statistical Significance ===")?;
    writeln!(
        out,
        "Iterations:      {} ({} metric, seed {})",
        summary.monte_carlo_iterations, summary.null_metric, summary.seed
    )?;
    writeln!(out, "P-value:         {:.2e}", summary.p_value)?;
    writeln!(
        out,
        "Significance:    {:.1} (-log10 p, max {:.1})",
        summary.significance, summary.max_significance
    )?;
    writeln!(
        out,
        "Expected:        {:.1} (closed form {:.2})",
        summary.null_mean, summary.expected_mean
    )?;
    writeln!(out, "Std deviation:   {:.1}", summary.null_std_dev)?;
    match summary.z_score {
        Some(z) => writeln!(out, "Z-score:         {:.2}", z)?,
        None => writeln!(out, "Z-score:         undefined (zero variance)")?,
    }
    writeln!(out, "Verdict:         {}", summary.verdict)?;
    writeln!(out)?;

    if !report.matches.is_empty() {
        writeln!(out, "=== Matches ===")?;
        writeln!(
            out,
            "{:<20} {:<20} {:>12}",
            "Primary", "Secondary", "Sep (arcmin)"
        )?;
        for m in &report.matches {
            writeln!(
                out,
                "{:<20} {:<20} {:>12.3}",
                m.primary_name(),
                m.secondary_name(),
                m.separation_arcmin()
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "=== Null Distribution ===")?;
    let histogram = report.histogram()?;
    let peak = histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let observed = summary.match_count as f64;
    for bin in &histogram {
        let bar = "#".repeat(bin.count * HISTOGRAM_WIDTH / peak);
        let marker = if (bin.lower..bin.upper).contains(&observed) {
            " <- observed"
        } else {
            ""
        };
        writeln!(
            out,
            "[{:>8.1}, {:>8.1}) {:>7} {}{}",
            bin.lower, bin.upper, bin.count, bar, marker
        )?;
    }
    if let Some(last) = histogram.last() {
        if observed >= last.upper {
            writeln!(out, "observed {} lies beyond every null sample", summary.match_count)?;
        }
    }
    Ok(())
}

fn print_json(report: &AnalysisReport) -> anyhow::Result<()> {
    let json = JsonReport {
        summary: report.summary(),
        matches: report.matches.iter().map(|m| m.to_row()).collect(),
        histogram: report.histogram()?,
    };
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &json)?;
    writeln!(out)?;
    Ok(())
}
