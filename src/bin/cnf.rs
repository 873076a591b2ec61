//! Command-line interface for cnf
//! This binary parses MySQL-style configuration files, resolves their includes
//! and runs path queries over the merged result.
//!
//! Usage:
//!   cnf inspect `<path>` [--format `<format>`]  - Print the merged document
//!   cnf stats `<path>` [--format `<format>`]    - Print derived statistics
//!   cnf includes `<path>`                     - Print the include status list
//!   cnf query `<path>` `<expression>`...        - Evaluate path queries

use clap::{Arg, Command};

use cnf::cnf::document::Element;
use cnf::cnf::file::ConfigurationFile;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("cnf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and querying MySQL-style configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("inspect")
                .about("Print the merged document")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('tree' or 'json')")
                        .default_value("tree"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Print derived statistics")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('table' or 'json')")
                        .default_value("table"),
                ),
        )
        .subcommand(
            Command::new("includes")
                .about("Print the include status list")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("query")
                .about("Evaluate path queries against the merged document")
                .arg(
                    Arg::new("path")
                        .help("Path to the configuration file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("expression")
                        .help("One or more path expressions")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("inspect", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_inspect_command(path, format);
        }
        Some(("stats", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_stats_command(path, format);
        }
        Some(("includes", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_includes_command(path);
        }
        Some(("query", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let expressions: Vec<String> = sub
                .get_many::<String>("expression")
                .unwrap()
                .cloned()
                .collect();
            handle_query_command(path, &expressions);
        }
        _ => unreachable!(),
    }
}

/// Load a file, or report its failure and exit
fn load_or_exit(path: &str) -> ConfigurationFile {
    let file = ConfigurationFile::load(path);
    if !file.parse_succeeded() {
        if let Some(error) = file.last_io_error() {
            eprintln!("Error reading {}: {}", path, error);
        }
        if let Some(error) = file.last_syntax_error() {
            eprintln!("Error parsing {}: {}", path, error);
        }
        std::process::exit(1);
    }
    file
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, format: &str) {
    let file = load_or_exit(path);
    let Some(document) = file.document() else {
        eprintln!("No document for {}", path);
        std::process::exit(1);
    };

    match format {
        "json" => {
            let output = serde_json::to_string_pretty(document).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        _ => print_element(&document.root, 0),
    }
}

fn print_element(element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    let attributes: Vec<String> = element
        .attributes
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    let mut line = format!("{}{}", indent, element.name);
    if !attributes.is_empty() {
        line.push_str(&format!(" [{}]", attributes.join(", ")));
    }
    if let Some(text) = &element.text {
        if !text.is_empty() {
            line.push_str(&format!(" = {}", text));
        }
    }
    println!("{}", line);

    for child in &element.children {
        print_element(child, depth + 1);
    }
}

/// Handle the stats command
fn handle_stats_command(path: &str, format: &str) {
    let file = load_or_exit(path);
    let Some(stats) = file.statistics() else {
        eprintln!("Statistics unavailable for {}", path);
        std::process::exit(1);
    };

    match format {
        "json" => {
            let output = serde_json::to_string_pretty(&stats).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        _ => {
            println!("TotalIncludeFiles       {}", stats.total_include_files);
            println!("IncludeFilesParsed      {}", stats.include_files_parsed);
            println!("TotalTopLevelNodes      {}", stats.total_top_level_nodes);
            println!("TotalFileTopLevelNodes  {}", stats.total_file_top_level_nodes);
            println!("FirstLineParsed         {}", stats.first_line_parsed);
            println!("LastLineParsed          {}", stats.last_line_parsed);
            println!("TotalComments           {}", stats.total_comments);
            println!("TotalFileComments       {}", stats.total_file_comments);
            println!("TotalKeys               {}", stats.total_keys);
        }
    }
}

/// Handle the includes command
fn handle_includes_command(path: &str) {
    let file = load_or_exit(path);
    if file.includes().is_empty() {
        println!("No includes in {}", path);
        return;
    }

    for record in file.includes() {
        let status = if record.succeeded { "ok" } else { "failed" };
        match &record.file {
            Some(nested) => println!("{:6}  {} ({})", status, record.declared_path, nested.file_name()),
            None => println!("{:6}  {}", status, record.declared_path),
        }
    }
}

/// Handle the query command
fn handle_query_command(path: &str, expressions: &[String]) {
    let file = load_or_exit(path);
    let Some(outcomes) = file.evaluate(expressions) else {
        eprintln!("No document for {}", path);
        std::process::exit(1);
    };

    for (expression, outcome) in &outcomes {
        if let Some(error) = &outcome.error {
            println!("{}: {}", expression, error);
        } else if !outcome.matched {
            println!("{}: no match", expression);
        } else {
            for result in &outcome.results {
                println!("{}: {}", expression, result);
            }
        }
    }
}
