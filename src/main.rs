use std::process::ExitCode;

use oxrdf::Graph;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metastate::dataset::Dataset;
use metastate::error::Result;
use metastate::ntriples;
use metastate::ruleset::SchemaRuleset;
use metastate::settings::Settings;

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1);
    let settings = match Settings::load(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "classification failed");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<()> {
    let mut schema = Graph::new();
    if let Some(path) = &settings.schema {
        for triple in ntriples::read(path)? {
            schema.insert(&triple);
        }
        info!(path = %path.display(), triples = schema.len(), "schema loaded");
    }
    let ruleset = SchemaRuleset::compile(&schema, &settings.ruleset)?;

    let mut dataset = Dataset::new(&ruleset);
    if let Some(path) = &settings.data {
        let triples = ntriples::read(path)?;
        let added = dataset.extend(&triples);
        info!(path = %path.display(), read = triples.len(), added, "data classified");
    }

    let snapshot = dataset.store().snapshot();
    let json = serde_json::to_string_pretty(&snapshot)?;
    println!("{json}");
    Ok(())
}
