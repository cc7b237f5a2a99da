use celestial_core::angular_separation_deg;
use celestial_crossmatch::{
    cross_match, estimate_null, evaluate, read_catalog_csv, run_analysis, sample_catalogs,
    uniform_sky_catalog, write_catalog_csv, write_matches_csv, AnalysisConfig, Catalog,
    CatalogRole, CrossMatcher, MatchStrategy, NullMetric, SkyPoint, Verdict, SAMPLE_SEED,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

fn random_pair(seed: u64, n_primary: usize, n_secondary: usize) -> (Catalog, Catalog) {
    let mut rng = StdRng::seed_from_u64(seed);
    let primary = uniform_sky_catalog(&mut rng, CatalogRole::Primary, n_primary).unwrap();
    let secondary = uniform_sky_catalog(&mut rng, CatalogRole::Secondary, n_secondary).unwrap();
    (primary, secondary)
}

#[test]
fn test_separation_across_ra_seam() {
    let sep = angular_separation_deg(10.0, 0.0, 350.0, 0.0);
    assert!((sep - 20.0).abs() < 1e-10, "sep = {}", sep);
}

#[test]
fn test_single_close_pair() {
    let gamma = Catalog::from_points(CatalogRole::Primary, [SkyPoint::new(180.0, 0.0)]).unwrap();
    let stars =
        Catalog::from_points(CatalogRole::Secondary, [SkyPoint::new(180.01, 0.0)]).unwrap();

    let matches = cross_match(&gamma, &stars, 5.0).unwrap();
    assert_eq!(matches.len(), 1);
    assert!((matches[0].separation_arcmin() - 0.6).abs() < 1e-6);
}

#[test]
fn test_unrelated_catalogs_are_not_significant() {
    let (gamma, stars) = random_pair(100, 100, 100);
    let matches = cross_match(&gamma, &stars, 0.01).unwrap();
    assert_eq!(matches.len(), 0);

    let null = estimate_null(gamma.len(), stars.len(), 0.01, 500, 1).unwrap();
    let result = evaluate(matches.len(), &null);
    assert!(result.p_value > 0.5, "p = {}", result.p_value);
    assert_eq!(result.verdict(), Verdict::WeakOrNone);
}

#[test]
fn test_planted_associations_are_recovered_and_significant() {
    let (gamma, random_stars) = random_pair(200, 100, 100);

    // Move the first ten secondary points next to the first ten primaries.
    let stars = Catalog::from_points(
        CatalogRole::Secondary,
        random_stars.iter().enumerate().map(|(i, s)| {
            if i < 10 {
                let p = &gamma.points()[i];
                let dec = if p.dec_deg > 0.0 {
                    p.dec_deg - 0.05
                } else {
                    p.dec_deg + 0.05
                };
                SkyPoint::new(p.ra_deg, dec)
            } else {
                s.clone()
            }
        }),
    )
    .unwrap();

    let config = AnalysisConfig {
        search_radius_arcmin: 10.0,
        monte_carlo_iterations: 2000,
        seed: Some(7),
        ..AnalysisConfig::default()
    };
    let report = run_analysis(config, &gamma, &stars).unwrap();

    for i in 0..10 {
        assert!(
            report.matches.iter().any(|m| m.pair() == (i, i)),
            "planted pair {} not recovered",
            i
        );
    }
    assert!(report.significance.significance > 3.0);
    assert_eq!(report.verdict(), Verdict::VeryStrong);
    assert!(report.significance.z_score.map_or(true, |z| z > 3.0));
}

#[test]
fn test_sample_catalogs_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let sample = sample_catalogs(SAMPLE_SEED).unwrap();
    let gamma_path = dir.path().join("gamma.csv");
    let stars_path = dir.path().join("stars.csv");
    write_catalog_csv(&gamma_path, &sample.primary).unwrap();
    write_catalog_csv(&stars_path, &sample.secondary).unwrap();

    let gamma = read_catalog_csv(&gamma_path, CatalogRole::Primary).unwrap();
    let stars = read_catalog_csv(&stars_path, CatalogRole::Secondary).unwrap();
    assert_eq!(gamma.len(), 50);
    assert_eq!(stars.len(), 200);
    assert_eq!(gamma.name(0), "4FGL_J0000");

    let matches = cross_match(&gamma, &stars, 30.0).unwrap();
    let mut planted = BTreeMap::new();
    for &(si, pi) in &sample.planted {
        planted.insert(si, pi);
    }
    for (&si, &pi) in &planted {
        assert!(
            matches.iter().any(|m| m.pair() == (pi, si)),
            "planted ({}, {}) missing",
            pi,
            si
        );
    }

    let out = dir.path().join("matches.csv");
    write_matches_csv(&out, &matches).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), matches.len() + 1);
}

#[test]
fn test_zones_agree_with_brute_force_on_sample() {
    let sample = sample_catalogs(3).unwrap();
    for radius in [5.0, 30.0, 300.0] {
        let brute = CrossMatcher::new(radius)
            .unwrap()
            .run(&sample.primary, &sample.secondary);
        let zones = CrossMatcher::new(radius)
            .unwrap()
            .with_strategy(MatchStrategy::Zones)
            .run(&sample.primary, &sample.secondary);
        assert_eq!(brute, zones);
    }
}

#[test]
fn test_report_expected_mean_tracks_null() {
    let (gamma, stars) = random_pair(300, 40, 60);
    for metric in [NullMetric::Planar, NullMetric::Spherical] {
        let config = AnalysisConfig {
            search_radius_arcmin: 240.0,
            monte_carlo_iterations: 3000,
            seed: Some(11),
            null_metric: metric,
            ..AnalysisConfig::default()
        };
        let report = run_analysis(config, &gamma, &stars).unwrap();
        let mean = report.null.mean();
        assert!(
            (mean - report.expected_mean).abs() / report.expected_mean < 0.08,
            "{}: mean {} vs expected {}",
            metric,
            mean,
            report.expected_mean
        );
    }
}

#[test]
fn test_significance_bounds_hold_for_any_observation() {
    let null = estimate_null(30, 30, 120.0, 1000, 5).unwrap();
    let max = (1000f64).log10();
    for observed in [0, 1, 2, 5, 50] {
        let r = evaluate(observed, &null);
        assert!((0.0..=1.0).contains(&r.p_value));
        assert!(r.significance >= 0.0 && r.significance.is_finite());
        assert!(r.significance <= max + 1e-12);
    }
}
