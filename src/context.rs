//! Wires the generator port to a live, recording, or replaying adapter.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::imagen::ImagenGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::BridgeError;
use crate::ports::ImageGenerator;

/// Where recordings are written, relative to the working directory.
const CASSETTE_DIR: &str = ".imagen-bridge/cassettes";

/// Bundles the generator port behind a single handle.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter still holds the recorder or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Live context: calls the real Imagen endpoint with the given credential.
    #[must_use]
    pub fn live(api_key: &str, config: &Config) -> Self {
        let generator =
            ImagenGenerator::new(api_key.to_string(), config.model(), config.base_url());
        Self { generator: Box::new(generator) }
    }

    /// Recording context: wraps the live adapter with a cassette recorder.
    #[must_use]
    pub fn recording(api_key: &str, config: &Config) -> (Self, RecordingSession) {
        let live = Self::live(api_key, config);

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(CASSETTE_DIR)
            .join(&timestamp)
            .join("image_generator.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_generator"),
            config.model(),
        )));

        let generator = RecordingImageGenerator::new(live.generator, Arc::clone(&recorder));
        (Self { generator: Box::new(generator) }, RecordingSession { recorder })
    }

    /// Replaying context backed by the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, BridgeError> {
        let replayer = CassetteReplayer::load(path).map_err(BridgeError::Cassette)?;
        let generator = ReplayingImageGenerator::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { generator: Box::new(generator) })
    }
}
