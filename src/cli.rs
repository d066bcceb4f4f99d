// Command Line Interface
// `tos-analyzer analyze | stats | config`

use anyhow::{bail, Context};
use tracing::info;

use crate::api;
use crate::services::{render_text, ConfigStore, InputSource, OutputFormat};

const USAGE: &str = "Usage:
  tos-analyzer analyze [<path>...|-] [--format json|text] [--out <path>] [--sequential]
  tos-analyzer stats [<path>|-] [--out <path>]
  tos-analyzer config [show|init]

Notes:
  - Without a path (or with '-') the document is read from stdin.
  - Several paths are analyzed concurrently and produce a batch report.
  - Input must be UTF-8 plain text.";

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 2] = ["--format", "--out"];

pub fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

pub fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Arguments that are neither flags nor flag values.
pub fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if arg == "-" || !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}

fn sources_from(paths: &[String]) -> Vec<InputSource> {
    if paths.is_empty() {
        vec![InputSource::Stdin]
    } else {
        paths.iter().map(|p| InputSource::from_arg(p)).collect()
    }
}

fn emit(output: &str, out_path: Option<&str>) -> anyhow::Result<()> {
    match out_path {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("Failed to write {}", path))?;
            info!("[CLI] Wrote {}", path);
        }
        None => println!("{}", output.trim_end()),
    }
    Ok(())
}

/// Run the CLI. `args` excludes the program name.
pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    match command.as_str() {
        "analyze" => run_analyze(rest).await,
        "stats" => run_stats(rest).await,
        "config" => run_config(rest),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("Unknown command `{}`\n\n{}", other, USAGE),
    }
}

async fn run_analyze(args: &[String]) -> anyhow::Result<()> {
    let store = ConfigStore::open_default()?;
    let mut config = api::get_config(&store).context("Failed to load config")?;

    if has_flag(args, "--sequential") {
        config.analysis.parallel = false;
    }
    let format: OutputFormat = match parse_arg_value(args, "--format") {
        Some(f) => f.parse()?,
        None => config.report.format,
    };
    let out_path = parse_arg_value(args, "--out");

    let mut sources = sources_from(&positional_args(args));
    if sources.iter().filter(|s| **s == InputSource::Stdin).count() > 1 {
        bail!("stdin ('-') can only be given once");
    }

    let output = if sources.len() == 1 {
        let source = sources.remove(0);
        let report = api::analyze_source(&source, &config)
            .await
            .with_context(|| format!("Failed to analyze {}", source))?;
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Text => render_text(&report),
        }
    } else {
        let batch = api::analyze_sources(sources, &config).await;
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&batch)?,
            OutputFormat::Text => {
                let mut text = String::new();
                for item in &batch.items {
                    match (&item.report, &item.error) {
                        (Some(report), _) => text.push_str(&render_text(report)),
                        (None, Some(error)) => text.push_str(&format!("{}: error: {}\n", item.source, error)),
                        (None, None) => {}
                    }
                    text.push('\n');
                }
                let s = &batch.summary;
                text.push_str(&format!(
                    "Documents: {}  Failed: {}  Average score: {:.1}  High risk: {}\n",
                    s.count, s.fail_count, s.avg_overall_score, s.high_risk_count
                ));
                text
            }
        }
    };

    emit(&output, out_path.as_deref())
}

async fn run_stats(args: &[String]) -> anyhow::Result<()> {
    let store = ConfigStore::open_default()?;
    let config = api::get_config(&store).context("Failed to load config")?;

    let paths = positional_args(args);
    if paths.len() > 1 {
        bail!("stats takes a single document");
    }
    let source = sources_from(&paths).remove(0);

    let stats = api::document_statistics(&source, &config)
        .await
        .with_context(|| format!("Failed to read {}", source))?;
    emit(&serde_json::to_string_pretty(&stats)?, parse_arg_value(args, "--out").as_deref())
}

fn run_config(args: &[String]) -> anyhow::Result<()> {
    let store = ConfigStore::open_default()?;
    match args.first().map(String::as_str).unwrap_or("show") {
        "show" => {
            let config = api::get_config(&store)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        "init" => {
            if api::init_config(&store)? {
                println!("Wrote default config to {}", store.config_file().display());
            } else {
                println!("Config already exists at {}", store.config_file().display());
            }
        }
        other => bail!("Unknown config action `{}` (expected show or init)", other),
    }
    Ok(())
}
