use std::path::Path;
use std::time::Duration;

use super::BurnInStyle;
use crate::process::ToolCommand;

/// Audio parameters for extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            channels: 1,
        }
    }
}

/// ffmpeg-specific helpers on top of [`ToolCommand`]
pub trait MediaCommandExt: Sized {
    fn input<P: AsRef<Path>>(self, path: P) -> Self;
    fn overwrite(self) -> Self;
    fn no_video(self) -> Self;
    fn audio_codec<S: Into<String>>(self, codec: S) -> Self;
    fn copy_audio(self) -> Self;
    fn audio_sample_rate(self, rate: u32) -> Self;
    fn audio_channels(self, channels: u32) -> Self;
    fn video_filter<S: Into<String>>(self, filter: S) -> Self;
}

impl MediaCommandExt for ToolCommand {
    fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").path(path)
    }

    fn overwrite(self) -> Self {
        self.arg("-y")
    }

    fn no_video(self) -> Self {
        self.arg("-vn")
    }

    fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-acodec").arg(codec)
    }

    fn copy_audio(self) -> Self {
        self.arg("-c:a").arg("copy")
    }

    fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }
}

/// Escape a path for use inside an ffmpeg filter argument
pub fn escape_filter_path(path: &Path) -> String {
    let mut escaped = String::new();
    for c in path.to_string_lossy().chars() {
        if matches!(c, '\\' | ':' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builder for the ffmpeg invocations the pipeline needs
pub struct MediaCommandBuilder {
    binary_path: String,
    timeout: Option<Duration>,
}

impl MediaCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, description: &str) -> ToolCommand {
        ToolCommand::new(&self.binary_path, description).timeout(self.timeout)
    }

    /// `ffmpeg -i <video> -vn -acodec pcm_s16le -ar <rate> -ac <channels> -y <audio>`
    pub fn extract_audio<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        video_path: P,
        audio_path: Q,
        format: AudioFormat,
    ) -> ToolCommand {
        self.command("Audio extraction")
            .input(video_path)
            .no_video()
            .audio_codec("pcm_s16le")
            .audio_sample_rate(format.sample_rate)
            .audio_channels(format.channels)
            .overwrite()
            .path(audio_path)
    }

    /// Render subtitles into the picture, copying the audio stream as is
    pub fn burn_subtitles<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
        &self,
        video_path: P,
        subtitle_path: Q,
        output_path: R,
        style: &BurnInStyle,
        additional_options: &[String],
    ) -> ToolCommand {
        let filter = format!(
            "subtitles={}:force_style='{}'",
            escape_filter_path(subtitle_path.as_ref()),
            style.force_style()
        );

        self.command("Subtitle burn-in")
            .input(video_path)
            .video_filter(filter)
            .copy_audio()
            .args(additional_options.iter().cloned())
            .overwrite()
            .path(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ScreenPosition;

    #[test]
    fn test_extract_audio_args() {
        let cmd = MediaCommandBuilder::new("ffmpeg").extract_audio(
            "/in/movie.mp4",
            "/tmp/movie.wav",
            AudioFormat::default(),
        );

        assert_eq!(cmd.program, "ffmpeg");
        assert_eq!(
            cmd.args,
            vec![
                "-i", "/in/movie.mp4", "-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1", "-y",
                "/tmp/movie.wav"
            ]
        );
        assert!(cmd.timeout.is_none());
    }

    #[test]
    fn test_extract_audio_stereo_and_timeout() {
        let cmd = MediaCommandBuilder::new("/opt/ffmpeg")
            .with_timeout(Some(Duration::from_secs(30)))
            .extract_audio("a.mkv", "a.wav", AudioFormat { sample_rate: 44_100, channels: 2 });

        assert_eq!(cmd.program, "/opt/ffmpeg");
        assert!(cmd.display_line().contains("-ar 44100 -ac 2"));
        assert_eq!(cmd.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_burn_subtitles_args() {
        let style = BurnInStyle {
            position: ScreenPosition::UpperLeft,
            ..BurnInStyle::default()
        };
        let options = vec!["-crf".to_string(), "23".to_string()];
        let cmd = MediaCommandBuilder::new("ffmpeg").burn_subtitles(
            "in.mp4",
            "/tmp/subs.srt",
            "out.mp4",
            &style,
            &options,
        );

        assert_eq!(
            cmd.args,
            vec![
                "-i".to_string(),
                "in.mp4".to_string(),
                "-vf".to_string(),
                format!("subtitles=/tmp/subs.srt:force_style='{}'", style.force_style()),
                "-c:a".to_string(),
                "copy".to_string(),
                "-crf".to_string(),
                "23".to_string(),
                "-y".to_string(),
                "out.mp4".to_string(),
            ]
        );
        assert!(cmd.args[3].contains("Alignment=7"));
    }

    #[test]
    fn test_escape_filter_path() {
        assert_eq!(escape_filter_path(Path::new("/tmp/a.srt")), "/tmp/a.srt");
        assert_eq!(escape_filter_path(Path::new("C:\\subs\\it's.srt")), "C\\:\\\\subs\\\\it\\'s.srt");
    }
}
