use clap::Parser;
use matecon::cli::{Cli, Commands, ConvertArgs, Shell};

#[test]
fn convert_flag_parsing() {
    // Given
    let argv = vec![
        "matecon",
        "--quiet",
        "convert",
        "a.xlsx",
        "b.xlsm",
        "-o",
        "out/material.txt",
        "--strict",
        "--include-hidden",
    ];

    // When
    let cli = Cli::parse_from(argv);

    // Then
    assert!(cli.quiet);
    match cli.command {
        Commands::Convert(ConvertArgs { files, output, force, strict, include_hidden }) => {
            assert_eq!(files, vec!["a.xlsx", "b.xlsm"]);
            let p = output.expect("output captured");
            assert!(p.to_string_lossy().ends_with("material.txt"));
            assert!(!force);
            assert!(strict);
            assert!(include_hidden);
        }
        _ => panic!("expected Convert command"),
    }
}

#[test]
fn convert_requires_files() {
    assert!(Cli::try_parse_from(["matecon", "convert"]).is_err());
    assert!(Cli::try_parse_from(["matecon", "tree"]).is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from(["matecon", "tree", "a.xlsx", "--no-color", "--dry-run"]);
    assert!(cli.no_color);
    assert!(cli.dry_run);
    assert!(matches!(cli.command, Commands::Tree(_)));
}

#[test]
fn completions_shell_value() {
    let cli = Cli::parse_from(["matecon", "completions", "power-shell", "--stdout"]);
    match cli.command {
        Commands::Completions(args) => {
            assert!(matches!(args.shell, Shell::PowerShell));
            assert!(args.stdout);
        }
        _ => panic!("expected Completions command"),
    }
}
