//! subtitler - add English subtitles to videos with non-English audio
//!
//! Orchestrates ffmpeg (audio extraction, subtitle burn-in) and whisper
//! (transcription/translation) around a small SRT parse/write/retime core.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod paths;
pub mod process;
pub mod setup;
pub mod subtitle;
pub mod transcribe;
pub mod workdir;
pub mod workflow;
