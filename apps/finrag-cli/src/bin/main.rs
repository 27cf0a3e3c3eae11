use std::env;
use std::path::PathBuf;

use finrag_answer::{build_prompt, DEFAULT_TOP_K};
use finrag_core::config::Config;
use finrag_core::corpus::Corpus;
use finrag_core::kpi::load_kpi_summary;
use finrag_lexical::{retrieve, LexicalIndex};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <search|prompt|kpis> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => {
            let query = args.get(0).cloned().unwrap_or_else(|| {
                eprintln!("Usage: finrag search \"<query>\" [top_k]");
                std::process::exit(1)
            });
            let top_k = resolve_top_k(&config, args.get(1));
            let company: String = config
                .get("company.name")
                .unwrap_or_else(|_| "the company".to_string());
            let corpus = load_corpus(&config)?;
            let index = LexicalIndex::build(corpus.fragments())?;
            let hits = retrieve(&index, corpus.fragments(), &query, top_k)?;
            println!("Top {} fragments from {} disclosures:", hits.len(), company);
            for (rank, hit) in hits.iter().enumerate() {
                println!(
                    "{:>2}. [{:.4}] {} ({})",
                    rank + 1,
                    hit.score,
                    hit.id,
                    hit.source
                );
                println!("    {}", preview(&hit.text, 160));
            }
        }
        "prompt" => {
            let question = args.get(0).cloned().unwrap_or_else(|| {
                eprintln!("Usage: finrag prompt \"<question>\" [top_k]");
                std::process::exit(1)
            });
            let top_k = resolve_top_k(&config, args.get(1));
            let corpus = load_corpus(&config)?;
            let index = LexicalIndex::build(corpus.fragments())?;
            let hits = retrieve(&index, corpus.fragments(), &question, top_k)?;
            println!("{}", build_prompt(&question, &hits));
        }
        "kpis" => {
            let path: String = config
                .get("corpus.kpi_json")
                .unwrap_or_else(|_| "data/kpi_summary.json".to_string());
            let summary = load_kpi_summary(&PathBuf::from(path))?;
            for entry in summary.values() {
                match &entry.value {
                    serde_json::Value::Array(items) => {
                        println!("{}:", entry.label);
                        for item in items {
                            match item.as_str() {
                                Some(text) => println!("  - {}", text),
                                None => println!("  - {}", item),
                            }
                        }
                    }
                    value => {
                        let rendered = match value {
                            serde_json::Value::String(text) => text.clone(),
                            other => other.to_string(),
                        };
                        match &entry.unit {
                            Some(unit) => println!("{}: {} {}", entry.label, rendered, unit),
                            None => println!("{}: {}", entry.label, rendered),
                        }
                    }
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn load_corpus(config: &Config) -> anyhow::Result<Corpus> {
    let path: String = config
        .get("corpus.chunks_csv")
        .unwrap_or_else(|_| "data/chunks.csv".to_string());
    Ok(Corpus::from_csv_path(&PathBuf::from(path))?)
}

fn resolve_top_k(config: &Config, arg: Option<&String>) -> usize {
    arg.and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| config.get("retrieval.top_k").unwrap_or(DEFAULT_TOP_K))
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
