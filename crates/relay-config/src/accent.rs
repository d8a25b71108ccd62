use std::path::PathBuf;

use serde::Deserialize;

/// Stress/accent normalization applied before synthesis
///
/// Stress marks use the `+` convention: `+` precedes the stressed vowel.
/// Defaults to no accentizer; `speech-relay.example.toml` at the repository
/// root shows the `command` and `dictionary` forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccentConfig {
    /// Pass text through unchanged
    #[default]
    None,
    /// Word-level stress dictionary, one accented word per line (`мол+око`)
    Dictionary {
        /// Dictionary file
        path: PathBuf,
    },
    /// External accentizer reading text on stdin and writing the annotated text to stdout
    Command {
        /// Executable looked up on `PATH`
        program: String,
        /// Extra arguments
        #[serde(default)]
        args: Vec<String>,
    },
}
