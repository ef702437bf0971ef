use clap::{CommandFactory, FromArgMatches, Parser};
use democracy_score::config::{Config, HistoryParams, ScoringWeights};
use democracy_score::error::DemocracyError;
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let mut argv = vec!["test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_cli_defaults_match_default_impl() {
    let (cli, _) = parse(&[]);
    assert_eq!(cli.config.weights, ScoringWeights::default());
    assert_eq!(cli.config.history.limit, HistoryParams::default().limit);
    assert_eq!(cli.config.history.offset, 0);
    assert!(!cli.config.history.strict);
}

#[test]
fn test_dimension_weights_parsing_defaults() {
    let weights = ScoringWeights::default();
    assert_eq!(weights.get_dimension_weights().unwrap(), [1.0; 5]);
}

#[test]
fn test_dimension_weights_parsing_custom() {
    let weights = ScoringWeights {
        dimension_weights: " 2.0, 1, 0.5 ,0,3".to_string(),
        ..Default::default()
    };
    assert_eq!(
        weights.get_dimension_weights().unwrap(),
        [2.0, 1.0, 0.5, 0.0, 3.0]
    );
}

#[test]
fn test_dimension_weights_wrong_count() {
    let weights = ScoringWeights {
        dimension_weights: "1,1,1".to_string(),
        ..Default::default()
    };
    let err = weights.get_dimension_weights().unwrap_err();
    assert!(matches!(err, DemocracyError::Config(_)));
    assert!(err.to_string().contains("requires 5 values"), "{}", err);
}

#[test]
fn test_dimension_weights_bad_number() {
    let weights = ScoringWeights {
        dimension_weights: "1,1,abc,1,1".to_string(),
        ..Default::default()
    };
    let err = weights.get_dimension_weights().unwrap_err();
    assert!(err.to_string().contains("Invalid number 'abc'"), "{}", err);
}

#[test]
fn test_dimension_weights_negative() {
    let weights = ScoringWeights {
        dimension_weights: "1,-1,1,1,1".to_string(),
        ..Default::default()
    };
    assert!(weights.get_dimension_weights().is_err());
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(ScoringWeights::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        ScoringWeights {
            weight_frequency: -1.0,
            ..Default::default()
        },
        ScoringWeights {
            weight_balance: f32::NAN,
            ..Default::default()
        },
        ScoringWeights {
            recency_half_life_days: 0.0,
            ..Default::default()
        },
        ScoringWeights {
            saturation_scale: -5.0,
            ..Default::default()
        },
        ScoringWeights {
            full_read_seconds: 0.0,
            ..Default::default()
        },
        ScoringWeights {
            min_engagement: 0.0,
            ..Default::default()
        },
        ScoringWeights {
            min_engagement: 1.5,
            ..Default::default()
        },
        ScoringWeights {
            partial_read_weight: -0.1,
            ..Default::default()
        },
        ScoringWeights {
            dimension_weights: "1,1".to_string(),
            ..Default::default()
        },
    ];
    for weights in cases {
        assert!(weights.validate().is_err(), "accepted {:?}", weights);
    }
}

#[test]
fn test_validate_error_names_field() {
    let weights = ScoringWeights {
        saturation_scale: 0.0,
        ..Default::default()
    };
    let msg = weights.validate().unwrap_err().to_string();
    assert!(msg.contains("saturation_scale"), "{}", msg);
}

#[test]
fn test_load_partial_weights_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "weight_balance": 5.0, "dimension_weights": "2,1,1,1,1" }}"#
    )
    .unwrap();

    let weights = ScoringWeights::load_from_file(file.path()).unwrap();
    assert_eq!(weights.weight_balance, 5.0);
    assert_eq!(weights.dimension_weights, "2,1,1,1,1");
    // Missing fields keep their defaults
    assert_eq!(weights.weight_frequency, 1.0);
    assert_eq!(weights.saturation_scale, 20.0);
}

#[test]
fn test_load_weights_errors() {
    let missing = ScoringWeights::load_from_file("/definitely/not/here.json");
    assert!(matches!(missing, Err(DemocracyError::Io(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let broken = ScoringWeights::load_from_file(file.path());
    assert!(matches!(broken, Err(DemocracyError::Json(_))));
}

#[test]
fn test_merge_only_explicit_flags_override_file() {
    let (cli, matches) = parse(&["--weight-balance", "7", "--saturation-scale", "40"]);

    let mut from_file = ScoringWeights {
        weight_frequency: 9.0,
        weight_balance: 1.0,
        saturation_scale: 10.0,
        ..Default::default()
    };
    from_file.merge_from_cli(&cli.config.weights, &matches);

    assert_eq!(from_file.weight_balance, 7.0);
    assert_eq!(from_file.saturation_scale, 40.0);
    // Not given on the command line: the file value survives the CLI default
    assert_eq!(from_file.weight_frequency, 9.0);
}

#[test]
fn test_merge_dimension_weights_string() {
    let (cli, matches) = parse(&["--dimension-weights", "0,1,0,0,0"]);
    let mut from_file = ScoringWeights::default();
    from_file.merge_from_cli(&cli.config.weights, &matches);
    assert_eq!(
        from_file.get_dimension_weights().unwrap(),
        [0.0, 1.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_history_params_from_cli() {
    let (cli, _) = parse(&["--limit", "10", "--offset", "5", "--strict"]);
    assert_eq!(cli.config.history.limit, 10);
    assert_eq!(cli.config.history.offset, 5);
    assert!(cli.config.history.strict);
}
