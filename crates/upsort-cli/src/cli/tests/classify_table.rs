use super::*;

#[test]
fn cli_parse_classify() {
    match parse(&["upsort", "classify", "a.pdf", "b.zip"]) {
        CliCommand::Classify { filenames } => assert_eq!(filenames, vec!["a.pdf", "b.zip"]),
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_classify_requires_filename() {
    assert!(Cli::try_parse_from(["upsort", "classify"]).is_err());
}

#[test]
fn cli_parse_table() {
    match parse(&["upsort", "table"]) {
        CliCommand::Table => {}
        _ => panic!("expected Table"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["upsort", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}
