//! `crossmatch sample`: write the demo catalogs to disk

use crate::cli::{Cli, SampleArgs};
use anyhow::Context;
use celestial_crossmatch::{sample_catalogs, write_catalog_csv};
use std::fs;

pub fn run(args: &SampleArgs, _cli: &Cli) -> anyhow::Result<()> {
    if !args.output_dir.exists() {
        fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("Failed to create {:?}", args.output_dir))?;
    }
    let sample = sample_catalogs(args.seed)?;

    let gamma_path = args.output_dir.join("gamma.csv");
    let stars_path = args.output_dir.join("stars.csv");
    write_catalog_csv(&gamma_path, &sample.primary)
        .with_context(|| format!("Failed to write {:?}", gamma_path))?;
    write_catalog_csv(&stars_path, &sample.secondary)
        .with_context(|| format!("Failed to write {:?}", stars_path))?;

    println!(
        "Wrote {} primary sources to {:?}",
        sample.primary.len(),
        gamma_path
    );
    println!(
        "Wrote {} secondary sources to {:?} ({} planted near primaries)",
        sample.secondary.len(),
        stars_path,
        sample.planted.len()
    );
    Ok(())
}
