use anyhow::Context;
use serde::Serialize;
use tos_analyzer_lib::cli::{has_flag, parse_arg_value};
use tos_analyzer_lib::services::{normalize_text, read_document, segment_sentences, InputSource, Sentence};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") {
        eprintln!(
            "Usage:\n  cargo run --bin segment_text -- <path.txt|-> [--sentences <n>] [--out <json_path>]\n\nNotes:\n  - Prints the sentences the analyzer works on, with UTF-8 byte offsets.\n  - The text is normalized exactly as `tos-analyzer analyze` does."
        );
        return Ok(());
    }

    let source = InputSource::from_arg(&args[1]);
    let sentences_n: usize = parse_arg_value(&args, "--sentences")
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);
    let out_path = parse_arg_value(&args, "--out");

    let raw = read_document(&source)
        .await
        .with_context(|| format!("Failed to read {}", source))?;
    let text = normalize_text(&raw);
    let sentences = segment_sentences(&text);

    println!("Source: {}", source);
    println!("Normalized: {} chars ({} bytes)", text.chars().count(), text.len());
    println!("Sentences: {}", sentences.len());
    println!();

    for s in sentences.iter().take(sentences_n) {
        println!(
            "[S{:04}] bytes=[{},{}] chars={}  {}",
            s.index,
            s.start,
            s.end,
            s.text.chars().count(),
            preview(s.text, 120)
        );
    }
    if sentences.len() > sentences_n {
        println!("... ({} more sentences)", sentences.len() - sentences_n);
    }

    if let Some(out_path) = out_path {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Output<'a> {
            source: String,
            normalized_chars: usize,
            normalized_bytes: usize,
            sentences: &'a [Sentence<'a>],
        }

        let out = Output {
            source: source.label(),
            normalized_chars: text.chars().count(),
            normalized_bytes: text.len(),
            sentences: &sentences,
        };

        let json = serde_json::to_string_pretty(&out)?;
        std::fs::write(&out_path, json).with_context(|| format!("Failed to write {}", out_path))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
