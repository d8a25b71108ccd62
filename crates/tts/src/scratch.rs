use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// WAV/MP3 file pair owned by a single request
///
/// Both files are removed when the guard drops, whichever way the request
/// ends. The MP3 path is only reserved: the transcoder creates it.
#[derive(Debug)]
pub struct ScratchFiles {
    wav: PathBuf,
    mp3: PathBuf,
}

impl ScratchFiles {
    /// Reserve a uniquely named pair in `dir`, or the system temp dir
    pub fn create(dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("speech-").suffix(".wav");

        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let wav = file.into_temp_path().keep().map_err(|e| e.error)?;
        let mp3 = wav.with_extension("mp3");

        Ok(Self { wav, mp3 })
    }

    pub fn wav(&self) -> &Path {
        &self.wav
    }

    pub fn mp3(&self) -> &Path {
        &self.mp3
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in [&self.wav, &self.mp3] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(path = %path.display(), "failed to remove scratch file: {e}"),
            }
        }
    }
}
