#![warn(clippy::pedantic)]

use std::io::{self, Read};

use anyhow::{Context as _, Result};
use reqwest::Url;
use serde_json::{json, Value};

use batch_tts_params::bing_speech::{ssml_preview, Prosody};
use batch_tts_params::config::{self, Config};
use batch_tts_params::google_translate::request_urls;
use batch_tts_params::{BatchPlan, ParameterResolver, SynthesisRequest};

fn wire_preview(config: &Config, plan: &BatchPlan) -> Result<Vec<Value>> {
    match &plan.request {
        SynthesisRequest::Edge(request) => {
            let prosody = Prosody::from_request(request);

            Ok(plan
                .jobs
                .iter()
                .map(|planned| {
                    let ssml = config
                        .ssml
                        .then(|| ssml_preview(request, &planned.job.content));

                    json!({
                        "file_name": planned.file_name,
                        "prosody": prosody,
                        "ssml": ssml,
                    })
                })
                .collect())
        }
        SynthesisRequest::Google(request) => {
            let host = Url::parse(&config.google_host)
                .with_context(|| format!("Invalid google_host: {}", config.google_host))?;

            plan.jobs
                .iter()
                .map(|planned| {
                    let urls = request_urls(&host, request, &planned.job.content)?;

                    Ok(json!({
                        "file_name": planned.file_name,
                        "urls": urls.iter().map(Url::as_str).collect::<Vec<_>>(),
                    }))
                })
                .collect()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    config::init()?;
    let config = config::get();

    let resolver = ParameterResolver::default();
    let selection = config.to_selection(&resolver)?;
    let request = resolver
        .resolve_request(&selection)
        .context("Failed to resolve synthesis request")?;

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read batch text from stdin")?;

    let plan = BatchPlan::new(request, &text);

    if plan.is_empty() {
        tracing::warn!("No non-blank lines, nothing to generate");
    }

    tracing::info!(
        engine = %plan.request.engine(),
        style = plan.request.style().unwrap_or("-"),
        jobs = plan.len(),
        "Resolved batch plan"
    );

    let wire = wire_preview(config, &plan)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "plan": plan, "wire": wire }))?
    );

    Ok(())
}
