//! Replays recorded interactions from a cassette.

use std::collections::HashMap;
use std::path::Path;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves interactions from a loaded cassette, sequentially per port/method
/// pair. Running past the recording is reported as an error, not a panic,
/// so a misconfigured replay still ends in a well-formed failure envelope.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Build a replayer from an in-memory cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        Self { queues, cursors: HashMap::new() }
    }

    /// Load a cassette file and build a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// given port/method combination.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "no interactions recorded for {port}::{method} (available: [{}])",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(format!(
                "all {} recorded interactions for {port}::{method} have been consumed",
                queue.len()
            ));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            model: "imagen-3.0-generate-002".into(),
            interactions,
        }
    }

    fn generate_interaction(seq: u64, prompt: &str) -> Interaction {
        Interaction {
            seq,
            port: "image_generator".into(),
            method: "generate".into(),
            input: json!({"prompt": prompt}),
            output: json!({"Ok": {"images": [], "metadata": null}}),
        }
    }

    #[test]
    fn replays_in_recording_order() {
        let cassette = make_cassette(vec![
            generate_interaction(0, "first"),
            generate_interaction(1, "second"),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("image_generator", "generate").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("image_generator", "generate").unwrap().seq, 1);
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let cassette = make_cassette(vec![generate_interaction(0, "only")]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert!(replayer.next_interaction("image_generator", "generate").is_ok());
        let err = replayer.next_interaction("image_generator", "generate").unwrap_err();
        assert!(err.contains("have been consumed"), "unexpected message: {err}");
    }

    #[test]
    fn unknown_port_is_an_error() {
        let cassette = make_cassette(vec![]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err = replayer.next_interaction("image_generator", "generate").unwrap_err();
        assert!(err.contains("no interactions recorded"), "unexpected message: {err}");
    }

    #[test]
    fn load_round_trips_a_written_cassette() {
        let dir = std::env::temp_dir().join("imagen_bridge_replayer_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.cassette.yaml");

        let cassette = make_cassette(vec![generate_interaction(0, "a red cat")]);
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let mut replayer = CassetteReplayer::load(&path).unwrap();
        let interaction = replayer.next_interaction("image_generator", "generate").unwrap();
        assert_eq!(interaction.input["prompt"], "a red cat");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(CassetteReplayer::load(Path::new("/nonexistent/session.cassette.yaml")).is_err());
    }
}
