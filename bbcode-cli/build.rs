use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["view-tree", "view-json", "model-json", "attribute-tree"];

fn input_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .help("Input document (JSON), or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("bbcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export editor documents to phpBB BBCode")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .arg(input_arg("input"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("inspect").arg(input_arg("path")).arg(
                Arg::new("transform")
                    .value_parser(clap::builder::PossibleValuesParser::new(
                        AVAILABLE_TRANSFORMS,
                    ))
                    .index(2)
                    .value_hint(ValueHint::Other),
            ),
        )
        .subcommand(Command::new("rules"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "bbcode", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "bbcode", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "bbcode", &outdir)?;

    Ok(())
}
