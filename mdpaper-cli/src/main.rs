// Command-line interface for mdpaper
//
// This binary turns a paper written in the mdpaper Markdown dialect into an
// HTML fragment, using the mdpaper-render pipeline. It replaces the ad hoc
// prerender script the paper used to ship with: read the source file, run
// the pipeline, write the fragment.
//
// Usage:
//  mdpaper <input> [-o <file>]             - Render to stdout or a file (default)
//  mdpaper render <input> [-o <file>]      - Same as above (explicit)
//  mdpaper inspect <input> [<stage>]       - Print the document after a pipeline stage
//  mdpaper --list-stages                   - List pipeline stages in execution order
//
// Configuration is layered: built-in defaults, then an optional
// ./mdpaper.toml, then an explicit --config file.

use clap::{Arg, ArgAction, Command, ValueHint};
use mdpaper_config::Loader;
use mdpaper_render::{render_until, render_with_options, stage_names, RenderOptions};
use std::fs;

fn build_cli() -> Command {
    let stage_values: Vec<&'static str> = stage_names().collect();

    Command::new("mdpaper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for rendering mdpaper Markdown documents to HTML")
        .long_about(
            "mdpaper is a command-line tool for the mdpaper Markdown dialect.\n\n\
            Commands:\n  \
            - render:  Convert a document to an HTML fragment\n  \
            - inspect: View the intermediate document after a pipeline stage\n\n\
            Examples:\n  \
            mdpaper content.md                      # Render to stdout\n  \
            mdpaper content.md -o content.html      # Render to a file\n  \
            mdpaper inspect content.md lists        # Stop after the list stage\n  \
            mdpaper --list-stages                   # Show the pipeline order",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-stages")
                .long("list-stages")
                .help("List pipeline stages in execution order")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdpaper.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a document to an HTML fragment (default command)")
                .long_about(
                    "Render an mdpaper Markdown document to an HTML fragment.\n\n\
                    The output is a fragment meant for injection into a container\n\
                    element, not a complete HTML page. It goes to stdout by\n\
                    default; use -o to write a file.\n\n\
                    Examples:\n  \
                    mdpaper render content.md               # Render to stdout\n  \
                    mdpaper render content.md -o out.html   # Render to a file\n  \
                    mdpaper content.md -o out.html          # 'render' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
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
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the intermediate document after a pipeline stage")
                .long_about(
                    "Run the pipeline prefix ending at the named stage and print\n\
                    the intermediate document. Useful for seeing what a later\n\
                    stage receives, e.g. the marked-but-unwrapped list items or\n\
                    the placeholder tokens between protect-pre and restore-pre.\n\n\
                    Defaults to the final stage, which is a full render.\n\n\
                    Examples:\n  \
                    mdpaper inspect content.md lists        # Stop after list wrapping\n  \
                    mdpaper inspect content.md protect-pre  # See placeholder tokens",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stage")
                        .help("Stage to stop after (defaults to the final stage)")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(stage_values))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(error) => {
            // If the first argument looks like a file rather than a
            // subcommand, inject "render" and retry.
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "render"
                && args[1] != "inspect"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(matches) => matches,
                    Err(retry_error) => retry_error.exit(),
                }
            } else {
                error.exit();
            }
        }
    };

    if matches.get_flag("list-stages") {
        handle_list_stages_command();
        return;
    }

    let options = load_render_options(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_render_command(input, output, &options);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let stage = match sub_matches.get_one::<String>("stage") {
                Some(stage) => stage.as_str(),
                // The final stage is a full render.
                None => stage_names().last().unwrap_or("references"),
            };
            handle_inspect_command(input, stage, &options);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(input: &str, output: Option<&str>, options: &RenderOptions) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let html = render_with_options(&source, options);

    match output {
        Some(path) => {
            fs::write(path, html).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{html}");
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, stage: &str, options: &RenderOptions) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    match render_until(&source, options, stage) {
        Some(text) => print!("{text}"),
        None => {
            eprintln!("Unknown stage '{stage}'. Use --list-stages to see the pipeline.");
            std::process::exit(1);
        }
    }
}

/// Handle the list-stages command
fn handle_list_stages_command() {
    println!("Pipeline stages, in execution order:\n");
    for name in stage_names() {
        println!("  {name}");
    }
    println!("\nUse 'mdpaper inspect <file> <stage>' to stop after any of them.");
}

fn load_render_options(explicit_path: Option<&str>) -> RenderOptions {
    let loader = Loader::new().with_optional_file("mdpaper.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    let config = loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    });

    config.render.into()
}
