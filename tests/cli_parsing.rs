use std::path::PathBuf;

use clap::Parser;
use context_engine::cli::{Cli, Commands};

#[test]
fn test_parse_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "context-engine",
        "run",
        "--issue",
        "PROJ-1",
        "-i",
        "PROJ-2",
        "--interval",
        "60",
        "--passes",
        "3",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.issues, vec!["PROJ-1", "PROJ-2"]);
            assert_eq!(args.interval, Some(60));
            assert_eq!(args.passes, Some(3));
        }
        other => panic!("Expected run, got {other:?}"),
    }
    assert!(!cli.json);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["context-engine", "run"]).unwrap();
    match cli.command {
        Commands::Run(args) => {
            assert!(args.issues.is_empty());
            assert_eq!(args.interval, None);
            assert_eq!(args.passes, None);
        }
        other => panic!("Expected run, got {other:?}"),
    }
}

#[test]
fn test_parse_once_with_global_flags() {
    let cli = Cli::try_parse_from([
        "context-engine",
        "once",
        "--issue",
        "PROJ-9",
        "--json",
        "--config",
        "/tmp/engine.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/engine.yaml")));
    match cli.command {
        Commands::Once(args) => assert_eq!(args.issues, vec!["PROJ-9"]),
        other => panic!("Expected once, got {other:?}"),
    }
}

#[test]
fn test_parse_config_command() {
    let cli = Cli::try_parse_from(["context-engine", "--json", "config"]).unwrap();
    assert!(matches!(cli.command, Commands::Config));
    assert!(cli.json);
}

#[test]
fn test_rejects_non_numeric_interval() {
    assert!(Cli::try_parse_from(["context-engine", "run", "--interval", "soon"]).is_err());
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(["context-engine"]).is_err());
}
