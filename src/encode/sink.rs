use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TopoError, TopoResult};
use crate::render::frame::FrameRGBA;

/// Sink contract for consuming rendered frames in sequence order.
///
/// `begin` is called once before the first frame and `end` once after the last. A failure in
/// `push_frame` aborts the run, leaving earlier frames in place.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self) -> TopoResult<()>;
    /// Push one frame under `name` (no extension).
    fn push_frame(&mut self, name: &str, frame: &FrameRGBA) -> TopoResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TopoResult<()>;
}

/// Make `dir` exist and be empty.
///
/// Destroys everything a previous run left in the directory, subdirectories included.
/// Running it twice is the same as running it once.
pub fn prepare_output_dir(dir: &Path) -> TopoResult<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(TopoError::Other(anyhow::anyhow!(
                "output path '{}' exists and is not a directory",
                dir.display()
            )));
        }
        let mut removed = 0usize;
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("read output dir '{}'", dir.display()))?
        {
            let path = entry
                .with_context(|| format!("list output dir '{}'", dir.display()))?
                .path();
            if path.is_dir() {
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("remove '{}'", path.display()))?;
            } else {
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove '{}'", path.display()))?;
            }
            removed += 1;
        }
        if removed > 0 {
            tracing::warn!(dir = %dir.display(), removed, "cleared previous output");
        }
    } else {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }
    Ok(())
}

/// Writes each frame as `<dir>/<name>.png`.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// Sink writing into `dir`; the directory is prepared in [`FrameSink::begin`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self) -> TopoResult<()> {
        self.written.clear();
        prepare_output_dir(&self.dir)
    }

    fn push_frame(&mut self, name: &str, frame: &FrameRGBA) -> TopoResult<()> {
        let path = self.dir.join(format!("{name}.png"));
        let img = frame.to_rgba_image()?;
        img.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), width = frame.width, height = frame.height, "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> TopoResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    began: bool,
    ended: bool,
    /// Frames in push order.
    pub(crate) frames: Vec<(String, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(String, FrameRGBA)] {
        &self.frames
    }

    /// Names of the captured frames in push order.
    pub fn names(&self) -> Vec<&str> {
        self.frames.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Whether `begin` and `end` were both called.
    pub fn is_complete(&self) -> bool {
        self.began && self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self) -> TopoResult<()> {
        self.began = true;
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, name: &str, frame: &FrameRGBA) -> TopoResult<()> {
        self.frames.push((name.to_owned(), frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TopoResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
