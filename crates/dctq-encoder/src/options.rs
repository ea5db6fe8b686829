//! Analyzer configuration

use dctq_core::Channel;
use std::path::{Path, PathBuf};

/// File names of every artifact written under an output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `dim.txt`
    pub fn dimensions_path(&self) -> PathBuf {
        self.dir.join("dim.txt")
    }

    /// `R.txt`, `G.txt`, `B.txt`
    pub fn channel_dump_path(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}.txt"))
    }

    /// `Qt_Y.txt`, `Qt_Cb.txt`, `Qt_Cr.txt`
    pub fn table_path(&self, channel: Channel) -> PathBuf {
        self.dir.join(format!("Qt_{}.txt", channel.label()))
    }

    /// `qF_Y.raw`, ...
    pub fn quantized_path(&self, channel: Channel) -> PathBuf {
        self.dir.join(format!("qF_{}.raw", channel.label()))
    }

    /// `eF_Y.raw`, ...
    pub fn residual_path(&self, channel: Channel) -> PathBuf {
        self.dir.join(format!("eF_{}.raw", channel.label()))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Analyzer options
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Where dumps and coefficient streams are written
    pub layout: OutputLayout,
    /// Log a warning when the image does not fill the block grid
    pub warn_on_truncation: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            layout: OutputLayout::default(),
            warn_on_truncation: true,
        }
    }
}

impl AnalyzerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.layout = OutputLayout::new(dir);
        self
    }

    pub fn warn_on_truncation(mut self, warn: bool) -> Self {
        self.warn_on_truncation = warn;
        self
    }
}
