use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Subset of a voice model's JSON configuration that this tool cares about.
/// Real model configs carry plenty of other keys (audio parameters, phoneme
/// tables, ...); they are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ModelConfig {
    #[serde(default)]
    pub speaker_id_map: Option<HashMap<String, u32>>,

    #[serde(default)]
    pub speakers: Option<HashMap<String, u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
    pub id: u32,
}

impl Speaker {
    pub fn output_filename(&self) -> String {
        format!("speaker_{}_{}.wav", self.id, self.name)
    }
}

impl ModelConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ModelConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// `speaker_id_map` wins, but an empty map falls through to `speakers`.
    fn speaker_map(&self) -> Option<&HashMap<String, u32>> {
        self.speaker_id_map
            .as_ref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.speakers.as_ref().filter(|m| !m.is_empty()))
    }

    /// Speakers sorted ascending by id, name as tie-break. Empty when the
    /// config has no usable speaker mapping.
    pub fn speakers_sorted(&self) -> Vec<Speaker> {
        let mut speakers: Vec<Speaker> = self
            .speaker_map()
            .map(|map| {
                map.iter()
                    .map(|(name, &id)| Speaker {
                        name: name.clone(),
                        id,
                    })
                    .collect()
            })
            .unwrap_or_default();

        speakers.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        speakers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> ModelConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_speakers_sorted_by_id() {
        let config = parse(r#"{"speaker_id_map": {"alice": 2, "bob": 0}}"#);
        let speakers = config.speakers_sorted();
        assert_eq!(
            speakers,
            vec![
                Speaker {
                    name: "bob".to_string(),
                    id: 0
                },
                Speaker {
                    name: "alice".to_string(),
                    id: 2
                },
            ]
        );
    }

    #[test]
    fn test_id_tie_breaks_on_name() {
        let config = parse(r#"{"speakers": {"zoe": 1, "amy": 1, "ben": 0}}"#);
        let speakers = config.speakers_sorted();
        let names: Vec<&str> = speakers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ben", "amy", "zoe"]);
    }

    #[test]
    fn test_speakers_key_is_fallback() {
        let config = parse(r#"{"speakers": {"carol": 5}}"#);
        let speakers = config.speakers_sorted();
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].name, "carol");
        assert_eq!(speakers[0].id, 5);
    }

    #[test]
    fn test_empty_primary_map_falls_through() {
        let config = parse(r#"{"speaker_id_map": {}, "speakers": {"dave": 3}}"#);
        let speakers = config.speakers_sorted();
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].name, "dave");
    }

    #[test]
    fn test_no_mapping_yields_empty() {
        assert!(parse("{}").speakers_sorted().is_empty());
        assert!(parse(r#"{"speaker_id_map": {}}"#).speakers_sorted().is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse(
            r#"{
                "audio": {"sample_rate": 22050},
                "num_speakers": 2,
                "speaker_id_map": {"alice": 0, "bob": 1}
            }"#,
        );
        assert_eq!(config.speakers_sorted().len(), 2);
    }

    #[test]
    fn test_output_filename() {
        let speaker = Speaker {
            name: "alice".to_string(),
            id: 2,
        };
        assert_eq!(speaker.output_filename(), "speaker_2_alice.wav");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ModelConfig::load(Path::new("does_not_exist.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"speaker_id_map": {{"eve": 7}}}}"#).unwrap();

        let config = ModelConfig::load(file.path()).unwrap();
        let speakers = config.speakers_sorted();
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].id, 7);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ModelConfig::load(file.path()).is_err());
    }
}
