use assert_fs::prelude::*;
use async_trait::async_trait;
use mockall::mock;
use mockall::Sequence;
use std::path::Path;
use std::sync::Arc;

use subtitler::config::Config;
use subtitler::error::Result;
use subtitler::media::{BurnInStyle, ScreenPosition};
use subtitler::process::{ProcessExecutor, ToolCommand, ToolOutput};
use subtitler::transcribe::WhisperModel;
use subtitler::workflow::{PipelineOptions, Workflow};

mock! {
    Executor {}

    #[async_trait]
    impl ProcessExecutor for Executor {
        async fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
    }
}

fn ok() -> Result<ToolOutput> {
    Ok(ToolOutput::new(Some(0), "", ""))
}

#[tokio::test]
async fn stages_run_in_order_with_expected_command_lines() {
    let temp = assert_fs::TempDir::new().unwrap();
    let video = temp.child("interview.mov");
    video.write_binary(b"video").unwrap();
    let scratch = temp.child("tmp");
    scratch.create_dir_all().unwrap();

    let mut config = Config::default();
    config.media.binary_path = "/opt/ffmpeg".to_string();
    config.media.sample_rate = 22_050;
    config.burn_in.primary_color = "cyan".to_string();

    let mut seq = Sequence::new();
    let mut executor = MockExecutor::new();

    executor
        .expect_run()
        .withf(|cmd| {
            cmd.program == "/opt/ffmpeg"
                && cmd.args.windows(2).any(|w| w[0] == "-ar" && w[1] == "22050")
                && cmd.args.last().is_some_and(|a| a.ends_with("interview.wav"))
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|cmd| {
            std::fs::write(cmd.args.last().unwrap(), b"RIFF")?;
            ok()
        });

    executor
        .expect_run()
        .withf(|cmd| {
            cmd.program == "whisper"
                && cmd.args.windows(2).any(|w| w[0] == "--model" && w[1] == "large")
                && cmd.args.windows(2).any(|w| w[0] == "--language" && w[1] == "it")
                && cmd.args.windows(2).any(|w| w[0] == "--task" && w[1] == "translate")
                && cmd.args.windows(2).any(|w| w[0] == "--output_format" && w[1] == "srt")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|cmd| {
            let pos = cmd.args.iter().position(|a| a == "--output_dir").unwrap();
            let srt = Path::new(&cmd.args[pos + 1]).join("interview.srt");
            std::fs::write(srt, "5\n00:00:00,000 --> 00:00:02,000\nCiao\n")?;
            ok()
        });

    executor
        .expect_run()
        .withf(|cmd| {
            cmd.program == "/opt/ffmpeg"
                && cmd.args.iter().any(|a| {
                    a.starts_with("subtitles=")
                        && a.contains("interview.adjusted.srt")
                        && a.contains("Alignment=3")
                        && a.contains("FontSize=18")
                        && a.contains("PrimaryColour=&HFFFF00")
                })
                && cmd.args.last().is_some_and(|a| a.ends_with("interview_subtitled.mov"))
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|cmd| {
            std::fs::write(cmd.args.last().unwrap(), b"video+subs")?;
            ok()
        });

    let mut options = PipelineOptions::new(video.path());
    options.model = WhisperModel::Large;
    options.language = "it".to_string();
    options.style = BurnInStyle {
        font_size: 18,
        position: ScreenPosition::LowerRight,
        primary_color: config.burn_in.primary_color.clone(),
        ..BurnInStyle::default()
    };

    let workflow = Workflow::with_executor(config, Arc::new(executor)).with_temp_root(scratch.path());
    let output = workflow.run(&options).await.unwrap();

    assert_eq!(output, temp.path().join("interview_subtitled.mov"));
    assert_eq!(std::fs::read(&output).unwrap(), b"video+subs");
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn whisper_without_output_fails_the_run() {
    let temp = assert_fs::TempDir::new().unwrap();
    let video = temp.child("clip.mp4");
    video.write_binary(b"video").unwrap();
    let scratch = temp.child("tmp");
    scratch.create_dir_all().unwrap();

    let mut executor = MockExecutor::new();
    executor.expect_run().times(2).returning(|cmd| {
        if cmd.description == "Audio extraction" {
            std::fs::write(cmd.args.last().unwrap(), b"RIFF")?;
        }
        ok()
    });

    let workflow = Workflow::with_executor(Config::default(), Arc::new(executor)).with_temp_root(scratch.path());
    let err = workflow.run(&PipelineOptions::new(video.path())).await.unwrap_err();

    assert!(err.to_string().contains("clip.srt"));
    assert!(!temp.path().join("clip_subtitled.mp4").exists());
}
