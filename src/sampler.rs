use crate::config::Speaker;
use crate::tts::{SynthesisRequest, Synthesizer};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

pub struct SpeakerSampler {
    output_dir: PathBuf,
    tts: Box<dyn Synthesizer>,
}

fn sample_text(speaker: &Speaker) -> String {
    format!("This is speaker {} sample", speaker.name)
}

impl SpeakerSampler {
    pub fn new(output_dir: PathBuf, tts: Box<dyn Synthesizer>) -> Self {
        Self { output_dir, tts }
    }

    /// Renders one sample per speaker, in order. A failed invocation is
    /// reported and skipped; it never aborts the run.
    pub async fn run(&self, speakers: &[Speaker]) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;

        println!("Sampling {} speakers...", speakers.len());

        let pb = ProgressBar::new(speakers.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        for speaker in speakers {
            pb.set_message(format!("{} (id {})", speaker.name, speaker.id));

            let request = SynthesisRequest {
                speaker_id: speaker.id,
                text: sample_text(speaker),
                output_path: self.output_dir.join(speaker.output_filename()),
            };

            if let Err(e) = self.tts.synthesize(&request).await {
                eprintln!(
                    "Warning: synthesis failed for speaker {} (id {}): {:#}",
                    speaker.name, speaker.id, e
                );
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        println!("Done. Samples in {}", self.output_dir.display());
        Ok(())
    }
}
