//! Unit tests for the command-line tokenizer.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::grammar;
use super::*;

fn text(value: &str) -> ArgValue {
    ArgValue::Text(value.to_owned())
}

#[rstest]
fn single_short_flag_takes_value() -> Result<()> {
    let argv = ArgvTable::parse(["-p", "8080"])?;
    ensure!(argv.get("p") == Some(&text("8080")), "got {argv:?}");
    ensure!(argv.len() == 1, "value token must not become a flag");
    Ok(())
}

#[rstest]
fn short_cluster_sets_each_letter() -> Result<()> {
    let argv = ArgvTable::parse(["-abc", "value"])?;
    for letter in ["a", "b", "c"] {
        ensure!(argv.get(letter) == Some(&ArgValue::Switch(true)), "{letter}: {argv:?}");
    }
    ensure!(argv.len() == 3);
    Ok(())
}

#[rstest]
fn inverted_flag_sets_both_names() -> Result<()> {
    let argv = ArgvTable::parse(["--no-verbose"])?;
    ensure!(argv.get("no-verbose") == Some(&ArgValue::Switch(true)));
    ensure!(argv.get("verbose") == Some(&ArgValue::Switch(false)));
    Ok(())
}

#[rstest]
fn inverted_flag_with_value_is_plain() -> Result<()> {
    let argv = ArgvTable::parse(["--no-cache", "soft"])?;
    ensure!(argv.get("no-cache") == Some(&text("soft")));
    ensure!(!argv.contains("cache"));
    Ok(())
}

#[rstest]
#[case(&["--port", "--host"], "port")]
#[case(&["--port", "-v"], "port")]
#[case(&["--port", ""], "port")]
#[case(&["-p", "--host", "x"], "p")]
fn flag_shaped_or_empty_tokens_are_not_values(#[case] args: &[&str], #[case] flag: &str) {
    let argv = ArgvTable::parse(args.iter().copied()).unwrap_or_default();
    assert_eq!(argv.get(flag), Some(&ArgValue::Switch(true)), "{args:?}");
}

#[rstest]
fn negative_numbers_are_values() -> Result<()> {
    let argv = ArgvTable::parse(["--offset", "-5"])?;
    ensure!(argv.get("offset") == Some(&text("-5")), "got {argv:?}");
    Ok(())
}

#[rstest]
fn stray_values_are_ignored() -> Result<()> {
    let argv = ArgvTable::parse(["serve", "--Port", "-x1", "---a"])?;
    ensure!(argv.is_empty(), "got {argv:?}");
    Ok(())
}

#[rstest]
#[case(&["-p", "1", "-p", "2"], "p")]
#[case(&["--verbose", "--no-verbose"], "verbose")]
#[case(&["-vv"], "v")]
fn duplicate_assignment_is_rejected(#[case] args: &[&str], #[case] flag: &str) {
    let err = ArgvTable::parse(args.iter().copied()).err();
    assert_eq!(
        err,
        Some(ArgvError::DuplicateFlag {
            flag: flag.to_owned()
        })
    );
}

#[rstest]
fn duplicate_message_uses_command_line_form() {
    let err = ArgvError::DuplicateFlag { flag: "p".into() };
    assert_eq!(err.to_string(), "command-line flag \"-p\" is set more than once");
}

#[rstest]
fn lookup_returns_single_hit() -> Result<()> {
    let argv = ArgvTable::parse(["-p", "3000"])?;
    let hit = argv.lookup(["port", "p"])?;
    ensure!(hit.map(|h| h.flag()) == Some("p"));
    ensure!(hit.map(|h| h.value()) == Some(&text("3000")));
    ensure!(argv.lookup(["host"])?.is_none());
    Ok(())
}

#[rstest]
fn lookup_reports_ambiguity_in_candidate_order() -> Result<()> {
    let argv = ArgvTable::parse(["-p", "1", "--port", "2"])?;
    let Err(err) = argv.lookup(["port", "p"]) else {
        anyhow::bail!("expected ambiguity");
    };
    ensure!(err.flags() == ["port", "p"]);
    ensure!(
        err.to_string() == "command-line flags \"--port\" and \"-p\" must not be set simultaneously",
        "message: {err}"
    );
    Ok(())
}

#[rstest]
fn lookup_lists_three_flags_with_commas() -> Result<()> {
    let argv = ArgvTable::parse(["-a", "--b-c", "--debug"])?;
    let Err(err) = argv.lookup(["a", "b-c", "debug"]) else {
        anyhow::bail!("expected ambiguity");
    };
    ensure!(
        err.to_string()
            == "command-line flags \"-a\", \"--b-c\" and \"--debug\" must not be set simultaneously",
        "message: {err}"
    );
    Ok(())
}

#[rstest]
fn lookup_ignores_repeated_candidates() -> Result<()> {
    let argv = ArgvTable::parse(["--port", "1"])?;
    ensure!(argv.lookup(["port", "port"])?.is_some());
    Ok(())
}

#[rstest]
#[case("port", true)]
#[case("log-level", true)]
#[case("a-1", true)]
#[case("x", true)]
#[case("Port", false)]
#[case("-port", false)]
#[case("port-", false)]
#[case("a--b", false)]
#[case("1st", false)]
#[case("", false)]
fn flag_name_grammar(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(grammar::is_flag_name(name), expected, "{name}");
}

#[rstest]
#[case("p", "-p")]
#[case("port", "--port")]
fn displays_flags(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(display_flag(name), expected);
}
