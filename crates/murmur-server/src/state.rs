use std::sync::Arc;

use murmur_audio::AudioNormalizer;
use murmur_engine::TranscriptionEngine;

/// Shared by every request handler
pub(crate) struct AppState {
    pub engine: Arc<dyn TranscriptionEngine>,
    pub normalizer: AudioNormalizer,
    pub sample_rate: u32,
    pub docs_path: String,
}
