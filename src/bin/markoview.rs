//! Markoview CLI - evaluate query probabilities over the sample database
//!
//! Usage:
//!   markoview                          # demo query (authors 1 and 2), both modes
//!   markoview --aid1 3 --aid2 4        # select the query pair
//!   markoview --mode robust -o json    # one mode, JSON output
//!   markoview --dump-store             # JSON snapshot of the materialized store

use clap::Parser;
use std::process;

use markoview::db::sample_db;
use markoview::engine::snapshot::{save_snapshot_json, Snapshot};
use markoview::{
    build_store_with_summaries, AuthorId, EvalMode, Predicate, QueryEvaluator, RelationKind,
    ViewStore,
};

#[derive(Parser)]
#[command(name = "markoview")]
#[command(version)]
#[command(about = "Markoview - query probability over weighted relational views")]
struct Cli {
    /// First author id of the query pair
    #[arg(long, value_name = "AID", default_value_t = 1)]
    aid1: u32,

    /// Second author id of the query pair
    #[arg(long, value_name = "AID", default_value_t = 2)]
    aid2: u32,

    /// Evaluation mode: plain, robust, or both
    #[arg(short, long, default_value = "both", value_name = "MODE")]
    mode: String,

    /// Output format: summary or json
    #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
    output: String,

    /// Dump the materialized store as a JSON snapshot and exit
    #[arg(long)]
    dump_store: bool,
}

fn main() {
    let cli = Cli::parse();

    let modes = match parse_modes(&cli.mode) {
        Ok(modes) => modes,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let db = sample_db();
    let (store, summaries) = build_store_with_summaries(&db);

    if cli.dump_store {
        match save_snapshot_json(&Snapshot::new(store)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing store snapshot: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let query = Predicate::author_pair(AuthorId(cli.aid1), AuthorId(cli.aid2));

    match cli.output.as_str() {
        "json" => match serde_json::to_string_pretty(&format_report(&cli, &store, &modes, &query))
        {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        },
        "summary" | _ => {
            print_summary(&cli, &store, &summaries, &modes, &query);
        }
    }
}

fn parse_modes(mode: &str) -> Result<Vec<EvalMode>, String> {
    match mode {
        "plain" => Ok(vec![EvalMode::Plain]),
        "robust" => Ok(vec![EvalMode::Robust]),
        "both" => Ok(vec![EvalMode::Plain, EvalMode::Robust]),
        other => Err(format!(
            "unknown mode '{}' (expected plain, robust, or both)",
            other
        )),
    }
}

fn mode_name(mode: EvalMode) -> &'static str {
    match mode {
        EvalMode::Plain => "plain",
        EvalMode::Robust => "robust",
    }
}

fn print_summary(
    cli: &Cli,
    store: &ViewStore,
    summaries: &[markoview::MaterializeSummary; 3],
    modes: &[EvalMode],
    query: &Predicate,
) {
    println!("Materialized relations:");
    for (relation, summary) in store.relations().zip(summaries) {
        println!(
            "  {}: {} tuples ({} inserted, {} duplicates, {} skipped)",
            relation.kind(),
            relation.len(),
            summary.inserted,
            summary.duplicates,
            summary.skipped
        );
        for tuple in relation.tuples() {
            println!("    {} weight {:.4}", tuple.key, tuple.raw_weight);
        }
    }

    let conflicts = store.relation(RelationKind::AdvisorConflict);
    if conflicts.is_empty() {
        println!("\nAdvisor rule: no violations found");
    } else {
        println!("\nAdvisor rule violations:");
        for tuple in conflicts.tuples() {
            if let Some(aid3) = tuple.key.aid3() {
                println!(
                    "  Advisor {} advises both {} and {}",
                    tuple.key.aid1(),
                    tuple.key.aid2(),
                    aid3
                );
            }
        }
    }

    println!("\nQuery: aid1 = {} AND aid2 = {}", cli.aid1, cli.aid2);
    for &mode in modes {
        let eval = QueryEvaluator::new(store, mode);
        println!("  [{}]", mode_name(mode));
        println!("    P0(Q or W) = {:.6}", eval.p0_query_or_world(query));
        println!("    P0(W)      = {:.6}", eval.p0_world());
        println!("    P(Q)       = {:.6}", eval.probability(query));
    }
}

/// Shapes the evaluation results for JSON output.
fn format_report(
    cli: &Cli,
    store: &ViewStore,
    modes: &[EvalMode],
    query: &Predicate,
) -> serde_json::Value {
    use serde_json::json;

    let relations: serde_json::Map<String, serde_json::Value> = store
        .relations()
        .map(|r| (r.kind().name().to_string(), json!(r.len())))
        .collect();

    // The uncorrected estimates can overflow on extreme stores; JSON has no
    // infinity, so non-finite values are rendered as strings.
    fn json_prob(v: f64) -> serde_json::Value {
        if v.is_finite() {
            serde_json::json!(v)
        } else {
            serde_json::json!(v.to_string())
        }
    }

    let results: serde_json::Map<String, serde_json::Value> = modes
        .iter()
        .map(|&mode| {
            let eval = QueryEvaluator::new(store, mode);
            (
                mode_name(mode).to_string(),
                json!({
                    "p0_query_or_world": json_prob(eval.p0_query_or_world(query)),
                    "p0_world": json_prob(eval.p0_world()),
                    "probability": eval.probability(query),
                }),
            )
        })
        .collect();

    json!({
        "query": { "aid1": cli.aid1, "aid2": cli.aid2 },
        "relations": relations,
        "results": results,
    })
}
