//! `crossmatch separation`: angular distance between two positions

use crate::cli::{Cli, SeparationArgs};
use celestial_core::angle::checked_position;
use celestial_core::constants::ARCMIN_PER_DEGREE;
use celestial_core::separation::angular_separation_deg;

pub fn run(args: &SeparationArgs, _cli: &Cli) -> anyhow::Result<()> {
    let (ra1, dec1) = checked_position(args.ra1, args.dec1)?;
    let (ra2, dec2) = checked_position(args.ra2, args.dec2)?;
    let sep = angular_separation_deg(ra1, dec1, ra2, dec2);
    log::debug!("({}, {}) -> ({}, {})", ra1, dec1, ra2, dec2);
    println!("{:.6} deg", sep);
    println!("{:.4} arcmin", sep * ARCMIN_PER_DEGREE);
    Ok(())
}
