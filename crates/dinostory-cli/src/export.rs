//! File-exporting audio capabilities for headless reading.
//!
//! Stand-ins for a browser's audio element and audio context: instead of
//! making sound they write what they would have played into a directory.
//! Both validate the audio container by its magic bytes, so unrecognised
//! payloads fail the same way an undecodable stream would. Every exported
//! file is also noted in the sink's diagnostics log.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use dinostory_core::{
    AudioAsset, AudioContextFactory, AudioFormat, AudioLog, AudioPlaybackDevice, DecodedAudio,
    LowLevelAudioBuffer, PlaybackError,
};

/// Output directory shared by the device and the audio context.
#[derive(Debug)]
pub struct ExportSink {
    dir: PathBuf,
    written: Mutex<Vec<PathBuf>>,
    log: Arc<AudioLog>,
}

impl ExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Mutex::new(Vec::new()),
            log: Arc::new(AudioLog::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Diagnostics log the sink records exports into; share it with the
    /// playback orchestrator to get one trail.
    pub const fn log(&self) -> &Arc<AudioLog> {
        &self.log
    }

    /// Files written so far, in order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, PlaybackError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PlaybackError::Device(format!("{}: {e}", self.dir.display())))?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| PlaybackError::Device(format!("{}: {e}", path.display())))?;
        tracing::debug!(target: "dinostory.playback", path = %path.display(), bytes = contents.len(), "Exported audio");
        self.log.record(format_args!("exported {name}"));
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.clone());
        Ok(path)
    }
}

/// Single-asset playback: writes `story.<ext>`, or `story.url` for hosted audio.
pub struct FileExportDevice {
    sink: Arc<ExportSink>,
}

impl FileExportDevice {
    pub const fn new(sink: Arc<ExportSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl AudioPlaybackDevice for FileExportDevice {
    async fn play_asset(&self, asset: AudioAsset) -> Result<(), PlaybackError> {
        match asset {
            AudioAsset::Bytes { data, mime } => {
                // Refusing unknown containers lets the chunked strategy take over.
                let format = AudioFormat::sniff(&data).ok_or_else(|| {
                    PlaybackError::Rejected(format!("unrecognised {mime} container"))
                })?;
                self.sink
                    .write(&format!("story.{}", format.extension()), &data)
                    .await?;
            }
            AudioAsset::Url(url) => {
                self.sink.write("story.url", format!("{url}\n").as_bytes()).await?;
            }
        }
        Ok(())
    }

    fn stop(&self) {}
}

/// One chunk per file: `chunk-001.<ext>`, `chunk-002.<ext>`, ...
pub struct FileExportBuffer {
    sink: Arc<ExportSink>,
    next_chunk: AtomicUsize,
}

#[async_trait]
impl LowLevelAudioBuffer for FileExportBuffer {
    async fn resume(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn decode(&self, data: Bytes, mime: &str) -> Result<DecodedAudio, PlaybackError> {
        let format = AudioFormat::sniff(&data)
            .ok_or_else(|| PlaybackError::Decode(format!("unrecognised {mime} container")))?;
        Ok(DecodedAudio { format, data })
    }

    async fn play(&self, buffer: DecodedAudio) -> Result<(), PlaybackError> {
        let n = self.next_chunk.fetch_add(1, Ordering::SeqCst) + 1;
        let name = format!("chunk-{n:03}.{}", buffer.format.extension());
        self.sink.write(&name, &buffer.data).await?;
        Ok(())
    }

    fn stop(&self) {}

    fn suspend(&self) {}
}

/// Hands out the file-exporting audio context.
pub struct FileExportContexts {
    sink: Arc<ExportSink>,
}

impl FileExportContexts {
    pub const fn new(sink: Arc<ExportSink>) -> Self {
        Self { sink }
    }
}

impl AudioContextFactory for FileExportContexts {
    fn create(&self) -> Result<Arc<dyn LowLevelAudioBuffer>, PlaybackError> {
        let buffer: Arc<dyn LowLevelAudioBuffer> = Arc::new(FileExportBuffer {
            sink: Arc::clone(&self.sink),
            next_chunk: AtomicUsize::new(0),
        });
        Ok(buffer)
    }
}
