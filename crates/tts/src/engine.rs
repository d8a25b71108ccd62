pub mod accent;
pub mod ffmpeg;
pub mod piper;

use std::{
    ffi::OsStr,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use crate::{error::EngineError, types::Waveform};

/// Stress/accent annotation applied to text before synthesis
pub trait Accentizer: Send + Sync {
    /// Annotate `text`, marking stressed vowels with a preceding `+`
    fn accentize(&self, text: &str) -> Result<String, EngineError>;

    /// Get the accentizer name
    fn name(&self) -> &str;
}

/// Neural text-to-speech model
pub trait Synthesizer: Send + Sync {
    /// Render normalized text into a waveform
    fn synthesize(&self, text: &str) -> Result<Waveform, EngineError>;

    /// Get the synthesizer name
    fn name(&self) -> &str;
}

/// WAV to compressed audio conversion
pub trait Transcoder: Send + Sync {
    /// Convert the WAV file at `input` into the file at `output`
    ///
    /// A non-zero exit must be reported as [`EngineError::Failed`] carrying
    /// the captured stderr.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), EngineError>;
}

/// Run `command` to completion, optionally feeding `stdin`, and fail on non-zero exit
pub(crate) fn run_captured(mut command: Command, stdin: Option<&[u8]>) -> Result<Output, EngineError> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| EngineError::Spawn {
        program: program.clone(),
        source,
    })?;

    let pipe = child.stdin.take();

    // Feed stdin from its own thread so a chatty child cannot fill stdout and stall us
    let output = std::thread::scope(|scope| {
        if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
            scope.spawn(move || {
                if let Err(e) = pipe.write_all(input) {
                    tracing::debug!("child closed stdin early: {e}");
                }
            });
        }

        child.wait_with_output()
    })?;

    if !output.status.success() {
        return Err(EngineError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// Program name used in logs
pub(crate) fn display_program(program: &OsStr) -> String {
    Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let mut command = Command::new("sh");
        command.args(["-c", "cat"]);

        let output = run_captured(command, Some("привет".as_bytes())).unwrap();
        assert_eq!(output.stdout, "привет".as_bytes());
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo broken pipe >&2; exit 3"]);

        match run_captured(command, None) {
            Err(EngineError::Failed { program, status, stderr }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken pipe");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let command = Command::new("definitely-not-installed-transcoder");
        assert!(matches!(run_captured(command, None), Err(EngineError::Spawn { .. })));
    }

    #[test]
    fn display_program_strips_directories() {
        assert_eq!(display_program(OsStr::new("/usr/bin/ffmpeg")), "ffmpeg");
        assert_eq!(display_program(OsStr::new("piper")), "piper");
    }
}
