mod config;
mod sampler;
mod tts;

use anyhow::Result;
use config::ModelConfig;
use log::info;
use sampler::SpeakerSampler;
use std::env;
use std::fs;
use std::path::PathBuf;
use tts::piper::PiperSynthesizer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <model.onnx> <model.json> [output_dir]",
            args.first().map(String::as_str).unwrap_or("piper-sampler")
        );
        std::process::exit(1);
    }

    let model_path = resolve_path(&args[1]);
    let config_path = resolve_path(&args[2]);
    let output_dir = match args.get(3) {
        Some(dir) => resolve_path(dir),
        None => env::current_dir()?.join("piper_speaker_samples"),
    };

    if !model_path.exists() {
        anyhow::bail!("Model not found: {}", model_path.display());
    }
    if !config_path.exists() {
        anyhow::bail!("Config not found: {}", config_path.display());
    }

    let config = ModelConfig::load(&config_path)?;
    let speakers = config.speakers_sorted();
    if speakers.is_empty() {
        anyhow::bail!(
            "No speaker_id_map/speakers found in {}; model may be single-speaker",
            config_path.display()
        );
    }
    info!(
        "Loaded {} speakers from {}",
        speakers.len(),
        config_path.display()
    );

    let tts = Box::new(PiperSynthesizer::from_env(model_path));
    let sampler = SpeakerSampler::new(output_dir, tts);
    sampler.run(&speakers).await?;

    Ok(())
}

/// Expands a leading `~` and canonicalizes paths that exist. A path that does
/// not exist yet is returned in expanded form, so diagnostics still name it.
fn resolve_path(raw: &str) -> PathBuf {
    let expanded = if raw == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw))
    } else if let Some(rest) = raw.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(raw),
        }
    } else {
        PathBuf::from(raw)
    };

    fs::canonicalize(&expanded).unwrap_or(expanded)
}
