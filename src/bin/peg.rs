//! Command-line interface for the bundled grammars
//!
//! Usage:
//!   peg calc `<expression>` [--format `<format>`] [--tolerant]  - Evaluate an arithmetic expression
//!   peg sql `<statement>` [--format `<format>`] [--tolerant]    - Parse a SQL select statement
//!   peg list-grammars                                        - List the bundled grammars

use clap::{Arg, ArgAction, ArgMatches, Command};
use peg::grammars::{calc, sql};
use peg::{Error, Value};

fn input_command(name: &'static str, about: &'static str, input_help: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new("input").help(input_help).required(true).index(1))
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("tolerant")
                .long("tolerant")
                .help("Print `no parse` instead of failing when the input does not match")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = Command::new("peg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run the bundled parsing expression grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(input_command(
            "calc",
            "Evaluate an arithmetic expression",
            "Expression such as 1*(2+3)-3",
        ))
        .subcommand(input_command(
            "sql",
            "Parse a SQL select statement",
            "Statement such as 'select a from t'",
        ))
        .subcommand(Command::new("list-grammars").about("List the bundled grammars"))
        .get_matches();

    match matches.subcommand() {
        Some(("calc", calc_matches)) => handle_calc_command(calc_matches),
        Some(("sql", sql_matches)) => handle_sql_command(sql_matches),
        Some(("list-grammars", _)) => handle_list_grammars_command(),
        _ => unreachable!(),
    }
}

struct Options<'m> {
    input: &'m str,
    json: bool,
    tolerant: bool,
}

impl<'m> Options<'m> {
    fn from_matches(matches: &'m ArgMatches) -> Self {
        Self {
            input: matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or_default(),
            json: matches.get_one::<String>("format").map(String::as_str) == Some("json"),
            tolerant: matches.get_flag("tolerant"),
        }
    }
}

/// Report a failed parse and exit, unless running tolerantly
fn handle_parse_error(error: Error, options: &Options<'_>) -> ! {
    match error {
        Error::Parse(_) if options.tolerant => {
            println!("no parse");
            std::process::exit(0);
        }
        Error::Parse(failure) => {
            eprintln!("Parse error: {}", failure);
            for cause in failure.chain().skip(1) {
                eprintln!("  while trying {}", cause);
            }
        }
        Error::Grammar(error) => eprintln!("Grammar error: {}", error),
    }
    std::process::exit(1);
}

/// Handle the calc command
fn handle_calc_command(matches: &ArgMatches) {
    let options = Options::from_matches(matches);
    let tree = calc::parse(options.input).unwrap_or_else(|e| handle_parse_error(e, &options));
    let result = calc::evaluate(&tree).unwrap_or_else(|e| {
        eprintln!("Evaluation error: {}", e);
        std::process::exit(1);
    });

    if options.json {
        let output = serde_json::json!({ "tree": tree, "value": result });
        println!("{}", output);
    } else {
        println!("{} = {}", options.input, result);
    }
}

/// Handle the sql command
fn handle_sql_command(matches: &ArgMatches) {
    let options = Options::from_matches(matches);
    let tree = sql::parse(options.input).unwrap_or_else(|e| handle_parse_error(e, &options));
    print_tree(&tree, options.json);
}

fn print_tree(tree: &Value, json: bool) {
    if json {
        match serde_json::to_string_pretty(tree) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", tree);
    }
}

/// Handle the list-grammars command
fn handle_list_grammars_command() {
    println!("Available grammars:\n");
    println!("  calc");
    println!("    Integer arithmetic with + - * / and parentheses.");
    println!("  sql");
    println!("    SQL select with column lists, from and join clauses.");
}
