//! Configuration builder backed by stand-in `piper` and `ffmpeg` scripts

use std::{
    fs,
    net::SocketAddr,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use relay_config::{AccentConfig, Config};
use tempfile::TempDir;

/// Sample rate of the canned voice clip
pub const VOICE_SAMPLE_RATE: u32 = 22_050;

/// Frames in the canned voice clip (0.1 s)
pub const VOICE_FRAMES: u32 = 2_205;

/// Configuration plus the directory holding its scripts, model, and scratch files
pub struct TestConfig {
    pub config: Config,
    dir: TempDir,
}

impl TestConfig {
    /// Directory that must be empty between requests
    pub fn scratch_dir(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }

    /// Text the fake synthesizer last received, without the trailing newline
    pub fn last_synthesized(&self) -> String {
        fs::read_to_string(self.dir.path().join("last_text.txt"))
            .unwrap_or_default()
            .trim_end_matches('\n')
            .to_string()
    }

    /// Command line the fake synthesizer was last invoked with
    pub fn last_synthesizer_args(&self) -> String {
        fs::read_to_string(self.dir.path().join("last_args.txt"))
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
    dir: TempDir,
}

impl ConfigBuilder {
    /// Working pipeline: the synthesizer emits a canned clip and the
    /// transcoder copies its input
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("scratch")).unwrap();
        fs::write(root.join("voice.onnx"), b"model").unwrap();
        write_voice_clip(&root.join("voice.wav"));

        let piper = write_script(
            root,
            "piper",
            &format!(
                "echo \"$@\" > '{dir}/last_args.txt'\ncat > '{dir}/last_text.txt'\ncat '{dir}/voice.wav'\n",
                dir = root.display()
            ),
        );
        let ffmpeg = write_script(root, "ffmpeg", "cp \"$3\" \"$8\"\n");

        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.synthesis.program = piper;
        config.synthesis.model_path = root.join("voice.onnx");
        config.transcoder.program = ffmpeg;
        config.transcoder.scratch_dir = Some(root.join("scratch"));

        Self { config, dir }
    }

    /// Replace the transcoder with one that always fails
    pub fn with_broken_transcoder(mut self) -> Self {
        self.config.transcoder.program = write_script(
            self.dir.path(),
            "ffmpeg-broken",
            "echo \"Unknown encoder '$5'\" >&2\nexit 1\n",
        );
        self
    }

    /// Use a stress dictionary with the given lines
    pub fn with_dictionary(mut self, lines: &[&str]) -> Self {
        let path = self.dir.path().join("stress.dic");
        fs::write(&path, lines.join("\n")).unwrap();
        self.config.accent = AccentConfig::Dictionary { path };
        self
    }

    /// Point the dictionary accentizer at a file that does not exist
    pub fn with_missing_dictionary(mut self) -> Self {
        self.config.accent = AccentConfig::Dictionary {
            path: self.dir.path().join("absent.dic"),
        };
        self
    }

    /// Use an accentizer command that always fails
    pub fn with_failing_accent_command(mut self) -> Self {
        let program = write_script(self.dir.path(), "accentizer", "echo 'omograph model crashed' >&2\nexit 2\n");
        self.config.accent = AccentConfig::Command {
            program,
            args: Vec::new(),
        };
        self
    }

    /// Add an exact-match correction
    pub fn with_patch(mut self, from: &str, to: &str) -> Self {
        self.config.patches.insert(from.to_string(), to.to_string());
        self
    }

    /// Disable the health check endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> TestConfig {
        TestConfig {
            config: self.config,
            dir: self.dir,
        }
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

fn write_voice_clip(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: VOICE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..VOICE_FRAMES {
        let sample: i16 = if i % 50 < 25 { 8_000 } else { -8_000 };
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}
