use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_info() {
    match parse(&["castload", "info", "demo.cast"]) {
        CliCommand::Info { locator } => assert_eq!(locator, "demo.cast"),
        _ => panic!("expected Info"),
    }
}

#[test]
fn cli_parse_cat_stdin() {
    match parse(&["castload", "cat", "-"]) {
        CliCommand::Cat { locator } => assert_eq!(locator, "-"),
        _ => panic!("expected Cat"),
    }
}

#[test]
fn cli_parse_cat_ipfs() {
    match parse(&["castload", "cat", "ipfs:/bafy123/rec.cast"]) {
        CliCommand::Cat { locator } => assert_eq!(locator, "ipfs:/bafy123/rec.cast"),
        _ => panic!("expected Cat"),
    }
}

#[test]
fn cli_requires_locator() {
    assert!(Cli::try_parse_from(["castload", "info"]).is_err());
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["castload", "play", "x.cast"]).is_err());
}
