use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// One synthesis job: render `text` with the given speaker into `output_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub speaker_id: u32,
    pub text: String,
    pub output_path: PathBuf,
}

#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<()>;
}

pub mod piper;
