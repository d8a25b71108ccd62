use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use relay_config::AccentConfig;

use crate::{
    engine::{
        Accentizer, Synthesizer, Transcoder,
        accent::{CommandAccentizer, DictionaryAccentizer, Passthrough},
        ffmpeg::FfmpegTranscoder,
        piper::PiperSynthesizer,
    },
    error::{EngineError, TtsError},
    patch::LexicalPatches,
    scratch::ScratchFiles,
    types::{SpeechResponse, Waveform},
};

/// Synthesis pipeline shared by all requests
///
/// Engines are constructed once and only read afterwards.
pub struct Server {
    accentizer: Arc<dyn Accentizer>,
    synthesizer: Arc<dyn Synthesizer>,
    transcoder: Arc<dyn Transcoder>,
    patches: LexicalPatches,
    scratch_dir: Option<PathBuf>,
}

impl Server {
    /// Assemble a pipeline from ready engines with the built-in patches
    pub fn new(
        accentizer: Arc<dyn Accentizer>,
        synthesizer: Arc<dyn Synthesizer>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        Self {
            accentizer,
            synthesizer,
            transcoder,
            patches: LexicalPatches::default(),
            scratch_dir: None,
        }
    }

    #[must_use]
    pub fn with_patches(mut self, patches: LexicalPatches) -> Self {
        self.patches = patches;
        self
    }

    /// Place scratch files in `dir` instead of the system temp dir
    #[must_use]
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = Some(dir);
        self
    }

    /// Run the full pipeline on decoded text
    ///
    /// Blocks on subprocesses and file I/O; call from a blocking context.
    pub fn synthesize(&self, text: &str) -> crate::error::Result<SpeechResponse> {
        if text.is_empty() {
            return Err(TtsError::EmptyInput);
        }

        let started = Instant::now();

        let processed = self.normalize(text);
        let char_count = processed.chars().count();

        let stage = Instant::now();
        let waveform = self.synthesizer.synthesize(&processed)?;
        log_stage("tts", stage.elapsed());

        let audio = self.encode(&waveform)?;

        let total = started.elapsed();
        #[allow(clippy::cast_precision_loss)]
        let per_char_ms = total.as_secs_f64() * 1000.0 / char_count.max(1) as f64;
        tracing::info!(
            total_secs = format_args!("{:.3}", total.as_secs_f64()),
            per_char_ms = format_args!("{per_char_ms:.0}"),
            audio_bytes = audio.len(),
            "synthesize complete"
        );

        Ok(SpeechResponse::mp3(audio))
    }

    /// Accentize `text` and apply lexical patches
    ///
    /// Accentizer failures are logged and the undecorated text is used.
    pub fn normalize(&self, text: &str) -> String {
        let stage = Instant::now();

        let accented = self.accentizer.accentize(text).unwrap_or_else(|e| {
            tracing::warn!(
                accentizer = self.accentizer.name(),
                "accent processing failed, using raw text: {e}"
            );
            text.to_string()
        });

        log_stage("accent", stage.elapsed());
        tracing::info!("processed text: {accented}");

        self.patches.apply(accented)
    }

    /// WAV to MP3 through request-scoped scratch files
    fn encode(&self, waveform: &Waveform) -> crate::error::Result<Vec<u8>> {
        let scratch = ScratchFiles::create(self.scratch_dir.as_deref())
            .map_err(|e| TtsError::Synthesis(format!("failed to create scratch files: {e}")))?;

        let stage = Instant::now();
        waveform.write_wav(scratch.wav())?;
        log_stage("save_wav", stage.elapsed());

        let stage = Instant::now();
        self.transcoder
            .transcode(scratch.wav(), scratch.mp3())
            .map_err(|e| match e {
                EngineError::Failed { .. } => TtsError::Transcode(e.to_string()),
                other => other.into(),
            })?;
        log_stage("ffmpeg", stage.elapsed());

        let audio = std::fs::read(scratch.mp3())
            .map_err(|e| TtsError::Synthesis(format!("failed to read transcoded audio: {e}")))?;

        Ok(audio)
    }
}

fn log_stage(stage: &'static str, elapsed: Duration) {
    tracing::info!(stage, duration_ms = elapsed.as_millis(), "synthesize stage finished");
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a relay_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a relay_config::Config) -> Self {
        Self { config }
    }

    /// Load the engines
    ///
    /// A synthesis model that cannot be loaded is fatal. An accentizer that
    /// cannot be loaded is logged and replaced by a passthrough.
    pub fn build(self) -> crate::error::Result<Server> {
        let synthesizer = PiperSynthesizer::new(&self.config.synthesis).map_err(|e| {
            TtsError::ConfigError(format!(
                "TTS model initialization error from {}: {e}",
                self.config.synthesis.model_path.display()
            ))
        })?;
        tracing::info!(model = %synthesizer.model_path().display(), "TTS model loaded");

        let accentizer = build_accentizer(&self.config.accent);
        tracing::info!(accentizer = accentizer.name(), "accentizer ready");

        let transcoder = FfmpegTranscoder::new(&self.config.transcoder);

        let mut server = Server::new(accentizer, Arc::new(synthesizer), Arc::new(transcoder))
            .with_patches(LexicalPatches::with_extra(&self.config.patches));

        if let Some(ref dir) = self.config.transcoder.scratch_dir {
            server = server.with_scratch_dir(dir.clone());
        }

        Ok(server)
    }
}

fn build_accentizer(config: &AccentConfig) -> Arc<dyn Accentizer> {
    match config {
        AccentConfig::None => Arc::new(Passthrough),
        AccentConfig::Dictionary { path } => match DictionaryAccentizer::load(path) {
            Ok(dictionary) => Arc::new(dictionary),
            Err(e) => {
                tracing::error!("accentizer initialization error: {e}");
                Arc::new(Passthrough)
            }
        },
        AccentConfig::Command { program, args } => Arc::new(CommandAccentizer::new(program.clone(), args.clone())),
    }
}
