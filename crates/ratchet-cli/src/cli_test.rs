use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_up_with_dir() {
    let cli = Cli::try_parse_from(["ratchet", "up", "--dir", "sql/migrations"]).unwrap();
    match cli.command {
        Commands::Up(args) => assert_eq!(args.dir.as_deref(), Some("sql/migrations")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ratchet",
        "down",
        "--database-url",
        "duckdb://app.duckdb",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(
        cli.global.database_url.as_deref(),
        Some("duckdb://app.duckdb")
    );
    assert!(matches!(cli.command, Commands::Down(_)));
}

#[test]
fn test_new_requires_name() {
    assert!(Cli::try_parse_from(["ratchet", "new"]).is_err());

    let cli = Cli::try_parse_from(["ratchet", "new", "--name", "create users"]).unwrap();
    match cli.command {
        Commands::New(args) => assert_eq!(args.name, "create users"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["ratchet", "migrate"]).is_err());
}
