#![allow(dead_code)]

pub mod config;
pub mod mock_whisper;
pub mod server;

/// One second of silent mono s16le PCM at 16 kHz
pub fn silent_pcm() -> Vec<u8> {
    vec![0; 32_000]
}

/// Multipart form carrying `audio` as the `audio_file` field
pub fn audio_form(filename: &str, audio: Vec<u8>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(audio).file_name(filename.to_owned());
    reqwest::multipart::Form::new().part("audio_file", part)
}
