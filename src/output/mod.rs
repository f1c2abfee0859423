use std::path::{Path, PathBuf};

use crate::error::{CcgError, CcgResult};
use crate::models::Device;
use crate::render::ConfigRenderer;

/// OutputWriter writes one configuration file per device
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// File name for a device, e.g. "ccg-core-sw1.txt".
    /// Path separators in the device name become `_` so the file stays in the output directory.
    pub fn file_name(&self, device: &str) -> String {
        let device = device.replace(['/', '\\'], "_");
        format!("{}{}.txt", self.prefix, device)
    }

    pub fn path_for(&self, device: &str) -> PathBuf {
        self.output_dir.join(self.file_name(device))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a device and write its file.
    /// The text is fully rendered before the file is opened.
    pub fn write_device(
        &self,
        renderer: &ConfigRenderer<'_>,
        device: &Device,
    ) -> CcgResult<PathBuf> {
        let text = renderer.render(device)?;
        let path = self.path_for(&device.name);
        std::fs::write(&path, text).map_err(|source| CcgError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote {} ({} interfaces)", path.display(), device.interfaces.len());
        Ok(path)
    }
}
