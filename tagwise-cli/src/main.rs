//! Tagwise CLI
//!
//! Lints hand-written markup, then prints the tree it parses to.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use owo_colors::OwoColorize;
use tagwise_common::warning;
use tagwise_dom::DomTree;
use tagwise_html::{
    Check, ErrorDetector, HTMLParser, NestingRules, ReconcilePolicy, Token, TreeSnapshot,
    outline, print_tree, tokenize,
};

/// Find authoring mistakes in markup and show the tree it parses to
#[derive(Parser, Debug)]
#[command(name = "tagwise")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "html"])))]
#[command(after_help = r#"EXAMPLES:
    # Lint a file and print its tree
    tagwise ./index.html

    # Parse inline markup, closing tags must match exactly
    tagwise --policy strict --html '<div><span></span></div>'

    # Refuse to parse when the linter finds anything
    tagwise --gate --skip missing-doctype --skip unescaped-characters page.html

    # JSON tree, no linting
    tagwise --no-lint --json page.html
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Parse this markup string instead of a file
    #[arg(long, value_name = "MARKUP")]
    html: Option<String>,

    /// How closing tags are matched against open elements
    #[arg(long, value_name = "POLICY", default_value_t = ReconcilePolicy::Lenient)]
    policy: ReconcilePolicy,

    /// Print the token list before the tree
    #[arg(long)]
    tokens: bool,

    /// Print the tree as JSON
    #[arg(long, conflicts_with = "outline")]
    json: bool,

    /// Print a breadth-first outline instead of the tree
    #[arg(long)]
    outline: bool,

    /// Skip the linter
    #[arg(long)]
    no_lint: bool,

    /// Exit with status 1 instead of parsing when the linter finds anything
    #[arg(long, conflicts_with = "no_lint")]
    gate: bool,

    /// Do not run this check (repeatable), e.g. `missing-doctype`
    #[arg(long, value_name = "CHECK")]
    skip: Vec<Check>,

    /// JSON table of forbidden parent/child tags
    #[arg(long, value_name = "FILE.json")]
    nesting_rules: Option<PathBuf>,

    /// Do not print warnings about implicitly closed elements
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    warning::set_enabled(!cli.quiet);
    let markup = load_markup(cli)?;

    if !cli.no_lint {
        let findings = build_detector(cli)?.diagnose(&markup);
        for finding in &findings {
            println!("{}", format!("[{}] {finding}", finding.check).yellow());
        }
        if cli.gate && !findings.is_empty() {
            eprintln!(
                "{}",
                format!("{} issue(s) found, not parsing", findings.len()).red()
            );
            return Ok(ExitCode::FAILURE);
        }
        if !findings.is_empty() {
            println!();
        }
    }

    let tokens = tokenize(&markup);
    if cli.tokens {
        println!("=== Tokens ===");
        for token in &tokens {
            println!("{token}");
        }
        println!();
    }

    match HTMLParser::new(tokens.clone()).with_policy(cli.policy).run() {
        Ok(tree) => {
            if cli.policy == ReconcilePolicy::Lenient {
                report_auto_closes(tokens);
            }
            print_output(cli, &tree)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", format!("parse error: {err}").red());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Warn about elements a successful lenient parse closed implicitly
///
/// The parser itself stays silent; a recovering parse of the same tokens
/// lists the auto-closes.
fn report_auto_closes(tokens: Vec<Token>) {
    let (_, issues) = HTMLParser::new(tokens).run_with_issues();
    for issue in issues.iter().filter(|issue| !issue.is_error) {
        warning::warn_once("Parser", &issue.message);
    }
}

/// Read the markup named on the command line
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    let path = cli
        .file
        .as_ref()
        .context("a FILE or --html is required")?;
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Detector configured from `--skip` and `--nesting-rules`
fn build_detector(cli: &Cli) -> Result<ErrorDetector> {
    let mut detector = ErrorDetector::new();
    if let Some(ref path) = cli.nesting_rules {
        let rules = NestingRules::from_json_file(path)?;
        detector = detector.with_nesting_rules(rules);
    }
    Ok(cli
        .skip
        .iter()
        .fold(detector, |detector, &check| detector.without_check(check)))
}

fn print_output(cli: &Cli, tree: &DomTree) -> Result<()> {
    if cli.json {
        let snapshot =
            TreeSnapshot::from_tree(tree, tree.root()).context("tree has no root node")?;
        println!("{}", snapshot.to_json()?);
    } else if cli.outline {
        print!("{}", outline(tree));
    } else {
        println!("=== Tree ===");
        print_tree(tree, tree.root(), 0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "tagwise",
            "--html",
            "<p>x</p>",
            "--policy",
            "strict",
            "--skip",
            "missing-doctype",
            "--skip",
            "unclosed-tags",
            "--outline",
        ])
        .unwrap();
        assert_eq!(cli.policy, ReconcilePolicy::Strict);
        assert_eq!(cli.skip, vec![Check::MissingDoctype, Check::UnclosedTags]);
        assert!(cli.outline);
        assert_eq!(load_markup(&cli).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["tagwise"]).is_err());
        assert!(Cli::try_parse_from(["tagwise", "a.html", "--html", "<p>"]).is_err());
    }

    #[test]
    fn test_output_flags_conflict() {
        assert!(Cli::try_parse_from(["tagwise", "--html", "x", "--json", "--outline"]).is_err());
        assert!(Cli::try_parse_from(["tagwise", "--html", "x", "--gate", "--no-lint"]).is_err());
    }

    #[test]
    fn test_unknown_check_rejected() {
        assert!(Cli::try_parse_from(["tagwise", "--html", "x", "--skip", "nope"]).is_err());
    }

    #[test]
    fn test_detector_from_flags() {
        let cli = Cli::try_parse_from([
            "tagwise",
            "--html",
            "<div>",
            "--skip",
            "missing-doctype",
            "--skip",
            "unescaped-characters",
        ])
        .unwrap();
        let detector = build_detector(&cli).unwrap();
        assert!(!detector.is_enabled(Check::MissingDoctype));
        assert_eq!(detector.detect("<div>"), vec!["Unclosed tag: <div>"]);
    }

    #[test]
    fn test_auto_closes_are_reported() {
        report_auto_closes(tokenize("<section><em>x</section>"));
        assert!(warning::has_warned(
            "Parser",
            "auto-closed <em> while closing </section>"
        ));
    }

    #[test]
    fn test_missing_rules_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "tagwise",
            "--html",
            "x",
            "--nesting-rules",
            "/nonexistent/rules.json",
        ])
        .unwrap();
        assert!(build_detector(&cli).is_err());
    }
}
