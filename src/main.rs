//! Refscan - JSON Schema recursion analyzer CLI

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use refscan_core::{Analysis, DefinitionsOutcome, DefsKey, Document};

fn print_usage() {
    eprintln!("Usage: refscan [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    JSON Schema file to analyze (stdin when omitted)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <JSON>      Analyze inline schema text");
    eprintln!("  --defs-key <KEY>          Definitions block key: definitions | $defs (default: $defs)");
    eprintln!("  --json                    Emit a machine-readable JSON report");
    eprintln!("  -h, --help                Print help");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut file_path: Option<PathBuf> = None;
    let mut inline: Option<String> = None;
    let mut defs_key = DefsKey::default();
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires schema text");
                    std::process::exit(2);
                }
                inline = Some(args[i].to_string());
            }
            "--defs-key" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --defs-key requires a value");
                    std::process::exit(2);
                }
                defs_key = match args[i].parse() {
                    Ok(key) => key,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(2);
                    }
                };
            }
            "--json" => {
                json_output = true;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(2);
            }
            _ => {
                if file_path.is_none() {
                    file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(2);
                }
            }
        }
        i += 1;
    }

    let analysis = match run(inline, file_path.as_deref(), defs_key) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&analysis) {
            Ok(report) => println!("{}", report),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        print_report(&analysis);
    }

    if analysis.has_recursion() {
        std::process::exit(1);
    }
}

fn run(
    inline: Option<String>,
    file_path: Option<&Path>,
    defs_key: DefsKey,
) -> anyhow::Result<Analysis> {
    let document = match (inline, file_path) {
        (Some(text), _) => Document::parse(text)?,
        (None, Some(path)) => {
            Document::load(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            Document::parse(text)?
        }
    };

    Ok(document.analyze(defs_key)?)
}

fn print_report(analysis: &Analysis) {
    match &analysis.recursion {
        Some(finding) => {
            println!("recursion: yes");
            println!("path: {}", finding.path);
            if let Some(line) = finding.line {
                println!("line: {}", line);
            }
            if !finding.lines.is_empty() {
                let lines: Vec<String> = finding.lines.iter().map(|l| l.to_string()).collect();
                println!("lines: {}", lines.join(", "));
            }
        }
        None => println!("recursion: no"),
    }

    match &analysis.definitions {
        DefinitionsOutcome::Clean => println!("definitions: clean"),
        DefinitionsOutcome::Cyclic { detail } => println!("definitions: cyclic ({})", detail),
        DefinitionsOutcome::Failed { detail } => println!("definitions: failed ({})", detail),
    }
}
