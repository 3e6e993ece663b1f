//! Focused unit tests covering command configuration and source validation.

use super::helpers::{SEGMENTS_CSV, Workspace};
use super::*;
use crate::distances::{DistancesConfig, config_from_layers_for_test as distances_layers};
use crate::proximity::{ProximityConfig, config_from_layers_for_test as proximity_layers};
use crate::tolls::{TollsConfig, config_from_layers_for_test as tolls_layers};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use waymark_core::{DEFAULT_TOLERANCE, TollError, VehicleClass};

#[rstest]
fn converting_distances_without_segments_errors() {
    let err = DistancesConfig::try_from(DistancesArgs::default())
        .expect_err("missing segments should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SEGMENTS);
            assert_eq!(env, ENV_DISTANCES_SEGMENTS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, Some(1), ARG_SEGMENTS, ENV_PROXIMITY_SEGMENTS)]
#[case(
    Some(Utf8PathBuf::from("segments.csv")),
    None,
    ARG_REFERENCE,
    ENV_PROXIMITY_REFERENCE
)]
fn converting_proximity_without_required_fields_errors(
    #[case] segments: Option<Utf8PathBuf>,
    #[case] reference: Option<i64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = ProximityArgs {
        segments,
        reference,
        ..ProximityArgs::default()
    };
    let err = ProximityConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn proximity_tolerance_defaults() {
    let args = ProximityArgs {
        segments: Some(Utf8PathBuf::from("segments.csv")),
        reference: Some(1_001_400),
        ..ProximityArgs::default()
    };
    let config = ProximityConfig::try_from(args).expect("config should build");
    assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    assert_eq!(config.output, None);
}

#[rstest]
fn tolls_overrides_only_named_coefficients() {
    let args = TollsArgs {
        segments: Some(Utf8PathBuf::from("segments.csv")),
        truck_rate: Some(4.0),
        weekend_factor: Some(0.5),
        ..TollsArgs::default()
    };
    let config = TollsConfig::try_from(args).expect("config should build");
    assert_eq!(config.coefficients.coefficient(VehicleClass::Truck), 4.0);
    assert_eq!(config.coefficients.coefficient(VehicleClass::Car), 1.2);
    assert_eq!(config.schedule.weekend, 0.5);
    assert_eq!(config.schedule.weekday_peak, 1.2);
}

#[rstest]
fn tolls_rejects_negative_coefficient() {
    let args = TollsArgs {
        segments: Some(Utf8PathBuf::from("segments.csv")),
        bus_rate: Some(-1.0),
        ..TollsArgs::default()
    };
    let err = TollsConfig::try_from(args).expect_err("negative coefficient");
    match err {
        CliError::Toll(TollError::InvalidCoefficient { class, .. }) => {
            assert_eq!(class, VehicleClass::Bus);
        }
        other => panic!("expected InvalidCoefficient, found {other:?}"),
    }
}

#[rstest]
fn tolls_rejects_non_finite_factor() {
    let args = TollsArgs {
        segments: Some(Utf8PathBuf::from("segments.csv")),
        peak_factor: Some(f64::INFINITY),
        ..TollsArgs::default()
    };
    let err = TollsConfig::try_from(args).expect_err("infinite factor");
    assert!(matches!(
        err,
        CliError::Toll(TollError::InvalidFactor {
            name: "weekday_peak",
            ..
        })
    ));
}

#[rstest]
fn validate_sources_reports_missing_files() {
    let workspace = Workspace::new();
    let config = DistancesConfig {
        segments: workspace.path("absent.csv"),
        output: None,
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_SEGMENTS),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let directory = workspace.path("segments");
    std::fs::create_dir(&directory).expect("segments directory");
    let config = DistancesConfig {
        segments: directory,
        output: None,
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_SEGMENTS),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_checks_optional_trips() {
    let workspace = Workspace::new();
    let config = TollsConfig::try_from(TollsArgs {
        segments: Some(workspace.write("segments.csv", SEGMENTS_CSV)),
        trips: Some(workspace.path("trips.csv")),
        ..TollsArgs::default()
    })
    .expect("config should build");
    let err = config.validate_sources().expect_err("missing trips");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_TRIPS),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn invalid_layer_maps_to_configuration_error() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "segments": 42 }));

    let err = distances_layers(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "segments": "from-file.csv",
            "reference": 1,
            "tolerance": 0.25,
        }),
        None,
    );
    composer.push_environment(json!({
        "segments": "from-env.csv",
        "reference": 2,
    }));
    composer.push_cli(json!({ "reference": 3 }));

    let config = proximity_layers(composer.layers()).expect("merged config should build");
    assert_eq!(config.segments, Utf8PathBuf::from("from-env.csv"));
    assert_eq!(config.reference, 3);
    assert_eq!(config.tolerance, 0.25);
}

#[rstest]
fn layered_rates_reach_the_coefficients() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "segments": "segments.csv", "moto_rate": 1.0 }),
        None,
    );
    composer.push_cli(json!({ "moto_rate": 0.5 }));

    let config = tolls_layers(composer.layers()).expect("merged config should build");
    assert_eq!(config.coefficients.coefficient(VehicleClass::Moto), 0.5);
}

#[rstest]
fn negative_reference_parses_from_the_command_line() {
    let cli = Cli::try_parse_from(["waymark", "proximity", "--reference", "-1"])
        .expect("negative reference should parse");
    match cli.command {
        Command::Proximity(args) => assert_eq!(args.reference, Some(-1)),
        other => panic!("expected proximity command, found {other:?}"),
    }
}
