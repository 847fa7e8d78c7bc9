use crate::tts::{SynthesisRequest, Synthesizer};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Overrides the synthesis executable, e.g. a venv install of piper.
const PIPER_BIN_ENV: &str = "PIPER_BIN";

pub struct PiperSynthesizer {
    executable: PathBuf,
    model_path: PathBuf,
}

impl PiperSynthesizer {
    pub fn new(executable: PathBuf, model_path: PathBuf) -> Self {
        Self {
            executable,
            model_path,
        }
    }

    /// Resolves the executable from `PIPER_BIN`, falling back to `piper` on
    /// the PATH.
    pub fn from_env(model_path: PathBuf) -> Self {
        let executable = env::var_os(PIPER_BIN_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("piper"));
        Self::new(executable, model_path)
    }
}

#[async_trait]
impl Synthesizer for PiperSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<()> {
        debug!(
            "{} --speaker {} -> {}",
            self.executable.display(),
            request.speaker_id,
            request.output_path.display()
        );

        let output = Command::new(&self.executable)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--speaker")
            .arg(request.speaker_id.to_string())
            .arg("--text")
            .arg(&request.text)
            .arg("--output_file")
            .arg(&request.output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "piper exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        if !request.output_path.exists() {
            warn!(
                "piper exited successfully but produced no file at {}",
                request.output_path.display()
            );
        }

        Ok(())
    }
}
