use correla::{ConsoleReporter, Correla, CorrelaConfig};
use correla_demos::common::{get_source, output_dir};

const CONFIG: &str = r#"{
    "acquisition": "PerDate",
    "provider_timeout": { "secs": 5, "nanos": 0 },
    "retry": {
        "attempts": 2,
        "backoff": { "min_backoff_ms": 100, "max_backoff_ms": 1000, "factor": 2, "jitter_percent": 20 }
    },
    "normality_alpha": 0.1,
    "focus_pair": ["ETH Price ($)", "BTC Price ($)"]
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fields left out of the document keep their defaults.
    let mut cfg = CorrelaConfig::from_json_str(CONFIG)?;
    cfg.output_dir = output_dir("04_json_config");

    let correla = Correla::builder().with_source(get_source()).config(cfg).build()?;
    let summary = correla.run(&mut ConsoleReporter::stdout()).await?;

    if let Some(focus) = summary.analysis.focus {
        println!("\nfocus pair: {} vs {}", focus.x, focus.y);
    }
    Ok(())
}
