// Command-line interface for bbcode
//
// This binary exports editor documents, stored as JSON model fragments, to phpBB BBCode.
//
// The document is rendered with the reference host (the same one the export tests use), so a
// model file is all the converter needs. Conversion rules come from the embedded defaults,
// optionally layered with ./bbcode.toml and an explicit --config file.
//
// Usage:
//  bbcode <input> [--output <file>] [--strict]          - Convert a document to BBCode (default)
//  bbcode convert <input> [--output <file>] [--strict]  - Same as above (explicit)
//  bbcode inspect <input> [<transform>]                 - Show a pipeline stage (defaults to "view-tree")
//  bbcode rules                                         - List the configured conversion rules
//
// Use "-" as the input to read the document from stdin.
//
// Logging goes to stderr through tracing. --verbose enables info level, otherwise RUST_LOG applies.

mod transforms;

use bbcode_config::{BbcodeConfig, Loader};
use bbcode_export::model::{self, Attributes};
use bbcode_export::render::render;
use bbcode_export::rules::TagRule;
use bbcode_export::{Converter, Priority, RuleRegistry};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::fs;
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "rules", "help"];

fn build_cli() -> Command {
    Command::new("bbcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export editor documents to phpBB BBCode")
        .long_about(
            "bbcode converts editor documents into phpBB-flavoured BBCode.\n\n\
            Documents are JSON model fragments: a list of element and text nodes, where\n\
            inline formatting (bold, italic, links, ...) lives in text attributes.\n\n\
            Commands:\n  \
            - convert: Convert a document to BBCode (default command)\n  \
            - inspect: View internal representations (view tree, attribute trees, ...)\n  \
            - rules:   List the configured conversion rules\n\n\
            Examples:\n  \
            bbcode doc.json                          # Convert to BBCode (stdout)\n  \
            bbcode doc.json -o post.txt              # Convert to a file\n  \
            bbcode inspect doc.json attribute-tree   # Show merged inline formatting\n  \
            bbcode rules --config bbcode.toml        # Rules after applying a config file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a bbcode.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to BBCode (default command)")
                .long_about(
                    "Convert a JSON model document to BBCode.\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    By default the converter repairs any disagreement between the model and\n\
                    the rendered view and keeps going. With --strict (or\n\
                    convert.lockstep = \"strict\" in the config) it fails instead.\n\n\
                    Examples:\n  \
                    bbcode convert doc.json                 # Convert to stdout\n  \
                    bbcode convert doc.json -o post.txt     # Convert to a file\n  \
                    cat doc.json | bbcode convert -         # Read from stdin\n  \
                    bbcode doc.json                         # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input document (JSON), or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail when the model and view walks disagree")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of a document")
                .long_about(
                    "View a document at different stages of the export pipeline.\n\n\
                    Transforms:\n  \
                    - view-tree:      Rendered view as a tree (default)\n  \
                    - view-json:      Rendered view as JSON\n  \
                    - model-json:     Model as JSON\n  \
                    - attribute-tree: Merged attribute tree of every text run\n\n\
                    Examples:\n  \
                    bbcode inspect doc.json                  # Tree visualization (default)\n  \
                    bbcode inspect doc.json attribute-tree   # Inline formatting after merging",
                )
                .arg(
                    Arg::new("path")
                        .help("Input document (JSON), or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'view-tree'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("List the configured conversion rules")
                .long_about(
                    "Lists inline rules in merge order (grouped by priority) and block rules by\n\
                    element name, after the configuration has been applied.",
                ),
        )
}

/// Inserts the default `convert` subcommand when the first argument is not a
/// known subcommand or a flag.
fn with_default_command(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    if (first.starts_with('-') && first != "-") || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = vec![args[0].clone(), "convert".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match with_default_command(&args) {
            Some(injected) => match cli.try_get_matches_from(&injected) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_tracing(matches.get_flag("verbose"));
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let strict = sub_matches.get_flag("strict");
            let config = load_cli_config(config_path, strict);
            handle_convert_command(input, output, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            let config = load_cli_config(config_path, false);
            handle_inspect_command(path, transform, &config);
        }
        Some(("rules", _)) => {
            let config = load_cli_config(config_path, false);
            handle_rules_command(&config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn handle_convert_command(input: &str, output: Option<&str>, config: &BbcodeConfig) {
    let converter = converter_from_config(config);
    let source = read_input(input);

    let fragment = model::Fragment::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Invalid document '{input}': {e}");
        std::process::exit(1);
    });

    let (view, mapper) = render(&fragment);
    let bbcode = converter
        .try_convert(&fragment, &view, &mapper)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });
    info!(input, bytes = bbcode.len(), "converted");

    match output {
        Some(path) => {
            fs::write(path, &bbcode).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{bbcode}"),
    }
}

fn handle_inspect_command(path: &str, transform: &str, config: &BbcodeConfig) {
    let converter = converter_from_config(config);
    let source = read_input(path);

    match transforms::execute_transform(&source, transform, converter.rules()) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        }
    }
}

fn handle_rules_command(config: &BbcodeConfig) {
    let converter = converter_from_config(config);
    print!("{}", describe_rules(converter.rules()));
}

/// Renders the registry the way the `rules` command prints it.
fn describe_rules(rules: &RuleRegistry) -> String {
    let none = Attributes::new();
    let mut output = String::from("Inline rules (merge order):\n");

    for priority in Priority::ALL {
        let mut group = rules.inline_by_priority(priority).peekable();
        if group.peek().is_none() {
            continue;
        }
        output.push_str(&format!("  {priority}\n"));
        for rule in group {
            output.push_str(&format!(
                "    {:<12} {:<16} {:?} {:?}\n",
                rule.name(),
                rule.required_attributes().join(","),
                rule.opening_tag(&none),
                rule.closing_tag(&none),
            ));
        }
    }

    output.push_str("\nBlock rules:\n");
    for rule in rules.list_block_rules() {
        output.push_str(&format!(
            "  {:<12} {:<6} {:?} {:?}\n",
            rule.name(),
            rule.side(),
            rule.opening_tag(&none),
            rule.closing_tag(&none),
        ));
    }
    output
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return source;
    }
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn converter_from_config(config: &BbcodeConfig) -> Converter {
    config.converter().unwrap_or_else(|err| {
        eprintln!("Invalid rule configuration: {err}");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>, strict: bool) -> BbcodeConfig {
    let loader = Loader::new().with_optional_file("bbcode.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if strict {
        loader.set_override("convert.lockstep", "strict")
    } else {
        Ok(loader)
    };

    loader
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}
