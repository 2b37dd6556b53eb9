use clap::Parser;
use std::path::PathBuf;

use crate::config::BurnInConfig;
use crate::error::Result;
use crate::media::{BurnInStyle, ScreenPosition};
use crate::subtitle::TimingAdjustment;
use crate::transcribe::WhisperModel;
use crate::workflow::PipelineOptions;

#[derive(Parser, Debug)]
#[command(
    name = "subtitler",
    author,
    version,
    about = "Add English subtitles to videos with non-English audio",
    long_about = None
)]
pub struct Args {
    /// Path to the input video file
    pub video_file: PathBuf,

    /// Path to the output video file (default: <input>_subtitled.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Whisper model to use for transcription
    #[arg(short, long, value_enum, default_value_t = WhisperModel::Medium)]
    pub model: WhisperModel,

    /// Keep temporary files after processing
    #[arg(short, long)]
    pub keep_temp: bool,

    /// Font size for subtitles
    #[arg(short, long, default_value_t = 24)]
    pub font_size: u32,

    /// Position of subtitles
    #[arg(short, long, value_enum, default_value_t = ScreenPosition::LowerCenter)]
    pub position: ScreenPosition,

    /// Source language code (e.g., de for German, fr for French)
    #[arg(short, long, default_value = "de")]
    pub language: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path (default: ./subtitler.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shift all subtitles by this many milliseconds (may be negative)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset_ms: i64,

    /// Stretch subtitle timing by this factor before shifting
    #[arg(long, default_value_t = 1.0)]
    pub scale_factor: f64,

    /// Subtitle text color (white, black, yellow, red, green, blue, cyan, magenta)
    #[arg(long)]
    pub font_color: Option<String>,

    /// Subtitle outline color
    #[arg(long)]
    pub outline_color: Option<String>,

    /// Subtitle outline width
    #[arg(long)]
    pub outline_width: Option<f64>,
}

impl Args {
    /// Burn-in style from the flags, falling back to the config file's colors
    pub fn burn_in_style(&self, defaults: &BurnInConfig) -> BurnInStyle {
        BurnInStyle {
            font_size: self.font_size,
            position: self.position,
            primary_color: self.font_color.clone().unwrap_or_else(|| defaults.primary_color.clone()),
            outline_color: self.outline_color.clone().unwrap_or_else(|| defaults.outline_color.clone()),
            outline_width: self.outline_width.unwrap_or(defaults.outline_width),
        }
    }

    pub fn pipeline_options(&self, defaults: &BurnInConfig) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            video_path: self.video_file.clone(),
            output_path: self.output.clone(),
            model: self.model,
            language: self.language.clone(),
            keep_temp: self.keep_temp,
            style: self.burn_in_style(defaults),
            timing: TimingAdjustment::new(self.offset_ms, self.scale_factor)?,
        })
    }
}
