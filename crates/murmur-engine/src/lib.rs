#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

pub mod backend;
mod engine;
mod error;
mod gate;
pub mod language;
mod model;
mod types;

use std::sync::Arc;

use murmur_config::{Config, EngineKind};

pub use backend::{StreamingWhisperModel, WhisperHttpModel};
pub use engine::{
    BatchEngine, DETECTION_WINDOW_SAMPLES, StreamingEngine, TranscriptionEngine, most_probable, pad_or_trim,
};
pub use error::{ModelError, Result, TranscriptionError};
pub use gate::ModelGate;
pub use model::{BatchModel, BatchOutput, LanguageProbabilities, SegmentStream, StreamInfo, StreamingModel};
pub use types::{DecodeOptions, Segment, Task, Transcript, TranscriptBuilder, TranscriptionOptions};

/// Build the configured engine around its model backend
///
/// Called once at startup; the engine is shared by every request.
///
/// # Errors
///
/// Returns an error if the model backend cannot be initialized
pub fn build_engine(config: &Config) -> anyhow::Result<Arc<dyn TranscriptionEngine>> {
    let engine_config = &config.engine;
    let name = engine_config.kind.to_string();

    tracing::info!(
        engine = %name,
        model = %engine_config.model,
        backend = %engine_config.base_url,
        "loading model"
    );

    let engine: Arc<dyn TranscriptionEngine> = match engine_config.kind {
        EngineKind::Whisper => {
            let model = WhisperHttpModel::new(engine_config, config.audio.sample_rate)
                .map_err(|e| anyhow::anyhow!("Failed to initialize {name} model: {e}"))?;

            Arc::new(BatchEngine::new(name, ModelGate::new(model)))
        }
        EngineKind::FasterWhisper => {
            let model = StreamingWhisperModel::new(engine_config, config.audio.sample_rate)
                .map_err(|e| anyhow::anyhow!("Failed to initialize {name} model: {e}"))?;

            Arc::new(StreamingEngine::new(name, ModelGate::new(model)))
        }
    };

    Ok(engine)
}
