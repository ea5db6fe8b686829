//! Block DCT quantization analyzer
//!
//! Runs the encode-side analysis pipeline over an RGB image:
//! 1. Convert RGB to level-shifted YCbCr
//! 2. Apply the 8x8 DCT to every whole block of each plane
//! 3. Quantize with the fixed luma/chroma tables
//! 4. Stream quantized values and residuals, and accumulate per-frequency SQNR
//!
//! Planes are processed in Y, Cb, Cr order. A failure on one plane never stops the
//! others; each plane reports its own [`PlaneResult`].

pub mod dump;
pub mod options;
pub mod quantizer;
pub mod sink;
pub mod sqnr;

pub use options::{AnalyzerOptions, OutputLayout};
pub use quantizer::{analyze_plane, PlaneAbort, PlaneResult, PlaneStats};
pub use sink::{CoefficientSink, FileSinks, MemorySinks, SinkProvider};
pub use sqnr::{Sqnr, SqnrAccumulator, SqnrReport};

use dctq_color::{convert_planes, YccPlanes};
use dctq_core::{Channel, DctqError, DctqResult, Dimensions, RgbPlanes};
use dctq_transform::{quant_table, DCT_MATRIX};
use tracing::{debug, info, warn};

/// What to do with a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Write the R, G and B planes and the dimensions as text
    ChannelDump,
    /// Convert, transform, quantize and report SQNR
    TransformQuantize,
}

/// Per-plane results of a transform/quantize run
#[derive(Debug)]
pub struct ImageAnalysis {
    pub dimensions: Dimensions,
    /// One entry per plane, Y then Cb then Cr
    pub planes: Vec<PlaneResult>,
    /// Table or dimension files that could not be written
    pub dump_failures: Vec<DctqError>,
}

impl ImageAnalysis {
    /// True when every plane was processed to the end
    pub fn is_complete(&self) -> bool {
        self.planes.iter().all(|p| p.is_ok())
    }

    /// Report for a plane, including partial reports of aborted planes
    pub fn report(&self, channel: Channel) -> Option<SqnrReport> {
        self.planes.iter().find_map(|plane| match plane {
            Ok(stats) if stats.channel == channel => Some(stats.report()),
            Err(abort) if abort.channel == channel => abort.partial.as_ref().map(|p| p.report()),
            _ => None,
        })
    }
}

/// Outcome of [`Analyzer::run`]
#[derive(Debug)]
pub enum RunOutcome {
    Dumped,
    Analyzed(ImageAnalysis),
}

/// Drives a [`Pipeline`] over an image
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Run the selected pipeline, writing into the configured output layout
    pub fn run(&self, pipeline: Pipeline, image: &RgbPlanes) -> DctqResult<RunOutcome> {
        match pipeline {
            Pipeline::ChannelDump => {
                self.dump_channels(image)?;
                Ok(RunOutcome::Dumped)
            }
            Pipeline::TransformQuantize => self.analyze_to_files(image).map(RunOutcome::Analyzed),
        }
    }

    /// Write `dim.txt` and one text file per RGB plane
    pub fn dump_channels(&self, image: &RgbPlanes) -> DctqResult<()> {
        let layout = &self.options.layout;
        self.write_dimensions(image.dimensions())?;
        for (label, plane) in image.labeled() {
            let path = layout.channel_dump_path(label);
            debug!(path = %path.display(), "dumping channel {}", label);
            dump::write_text_file(&path, |w| dump::write_plane_text(w, plane))?;
        }
        Ok(())
    }

    /// Write the quantization table used by each plane
    pub fn write_tables(&self) -> DctqResult<()> {
        Channel::ALL
            .into_iter()
            .try_for_each(|channel| self.write_table(channel))
    }

    /// Write `Qt_<plane>.txt` for one plane
    pub fn write_table(&self, channel: Channel) -> DctqResult<()> {
        let path = self.options.layout.table_path(channel);
        dump::write_text_file(&path, |w| dump::write_quant_table(w, quant_table(channel)))
    }

    fn write_dimensions(&self, dimensions: Dimensions) -> DctqResult<()> {
        let path = self.options.layout.dimensions_path();
        dump::write_text_file(&path, |w| dump::write_dimensions(w, dimensions))
    }

    /// Full file-backed analysis: tables, dimensions, then one stream pair per plane
    ///
    /// Table and dimension files that cannot be written are logged and recorded in
    /// [`ImageAnalysis::dump_failures`]; the planes are analyzed regardless.
    pub fn analyze_to_files(&self, image: &RgbPlanes) -> DctqResult<ImageAnalysis> {
        let mut dump_failures = Vec::new();
        for channel in Channel::ALL {
            if let Err(error) = self.write_table(channel) {
                warn!(%channel, "quantization table not written: {}", error);
                dump_failures.push(error);
            }
        }
        if let Err(error) = self.write_dimensions(image.dimensions()) {
            warn!("dimensions not written: {}", error);
            dump_failures.push(error);
        }

        let planes = convert_planes(image)?;
        let mut sinks = FileSinks::new(self.options.layout.clone());
        let mut analysis = self.analyze(&planes, &mut sinks);
        analysis.dump_failures = dump_failures;
        Ok(analysis)
    }

    /// Analyze already converted planes into streams opened from `sinks`
    pub fn analyze<P: SinkProvider>(&self, planes: &YccPlanes, sinks: &mut P) -> ImageAnalysis {
        let dimensions = planes.dimensions();
        if self.options.warn_on_truncation && !dimensions.is_block_aligned() {
            warn!(
                "{} is not a multiple of 8; only the top-left {} region is analyzed",
                dimensions,
                dimensions.truncated()
            );
        }

        let results = planes
            .iter()
            .map(|(channel, plane)| {
                debug!(%channel, blocks = dimensions.block_count(), "analyzing plane");
                let result = sinks
                    .open(channel)
                    .map_err(|error| PlaneAbort {
                        channel,
                        error,
                        partial: None,
                    })
                    .and_then(|mut sink| {
                        analyze_plane(channel, plane, quant_table(channel), &DCT_MATRIX, &mut sink)
                    });
                log_result(&result);
                result
            })
            .collect();

        ImageAnalysis {
            dimensions,
            planes: results,
            dump_failures: Vec::new(),
        }
    }
}

fn log_result(result: &PlaneResult) {
    match result {
        Ok(stats) => info!(
            channel = %stats.channel,
            blocks = stats.blocks,
            infinite_bins = stats.report().infinite_count(),
            "plane analyzed"
        ),
        Err(abort) => warn!(
            channel = %abort.channel,
            blocks = abort.partial.as_ref().map_or(0, |p| p.blocks),
            "plane aborted: {}",
            abort.error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dctq_core::Plane;
    use std::io;

    fn gradient(width: u32, height: u32) -> RgbPlanes {
        let dims = Dimensions::new(width, height);
        RgbPlanes::new(
            Plane::from_fn(dims, |r, c| (r * 7 + c * 3) as u8).unwrap(),
            Plane::from_fn(dims, |r, c| (255 - r * 5 - c) as u8).unwrap(),
            Plane::from_fn(dims, |r, c| ((r ^ c) * 9) as u8).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_analyze_in_memory_plane_order() {
        let planes = convert_planes(&gradient(16, 16)).unwrap();
        let mut sinks = MemorySinks::new();
        let analysis = Analyzer::default().analyze(&planes, &mut sinks);

        assert!(analysis.is_complete());
        assert_eq!(sinks.opened(), &Channel::ALL);
        let channels: Vec<_> = analysis
            .planes
            .iter()
            .map(|p| p.as_ref().unwrap().channel)
            .collect();
        assert_eq!(channels, Channel::ALL.to_vec());
        assert!(analysis.report(Channel::RedChroma).is_some());
    }

    /// Refuses to open the Cb streams
    struct NoBlueChroma;

    impl SinkProvider for NoBlueChroma {
        type Quantized = Vec<u8>;
        type Residual = Vec<u8>;

        fn open(&mut self, channel: Channel) -> DctqResult<CoefficientSink<Vec<u8>, Vec<u8>>> {
            if channel == Channel::BlueChroma {
                return Err(DctqError::SinkUnavailable {
                    path: "qF_Cb.raw".into(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(CoefficientSink::new(Vec::new(), Vec::new()))
        }
    }

    #[test]
    fn test_unavailable_sink_skips_only_that_plane() {
        let planes = convert_planes(&gradient(8, 8)).unwrap();
        let analysis = Analyzer::default().analyze(&planes, &mut NoBlueChroma);

        assert!(!analysis.is_complete());
        assert!(analysis.planes[0].is_ok());
        assert!(analysis.planes[2].is_ok());
        let abort = analysis.planes[1].as_ref().unwrap_err();
        assert_eq!(abort.channel, Channel::BlueChroma);
        assert!(abort.partial.is_none());
        assert!(analysis.report(Channel::BlueChroma).is_none());
    }

    #[test]
    fn test_run_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = Analyzer::new(AnalyzerOptions::new().output_dir(dir.path()));
        let outcome = analyzer.run(Pipeline::TransformQuantize, &gradient(16, 8)).unwrap();
        let RunOutcome::Analyzed(analysis) = outcome else {
            panic!("expected analysis");
        };
        assert!(analysis.is_complete());

        let layout = &analyzer.options().layout;
        for channel in Channel::ALL {
            assert_eq!(std::fs::metadata(layout.quantized_path(channel)).unwrap().len(), 128 * 2);
            assert_eq!(std::fs::metadata(layout.residual_path(channel)).unwrap().len(), 128 * 4);
            assert!(layout.table_path(channel).exists());
        }
        let dims = std::fs::read_to_string(layout.dimensions_path()).unwrap();
        assert_eq!(dims, "16 8\n");
        assert!(analysis.dump_failures.is_empty());
    }

    #[test]
    fn test_blocked_table_and_dimension_files_do_not_stop_planes() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = Analyzer::new(AnalyzerOptions::new().output_dir(dir.path()));
        let layout = &analyzer.options().layout;
        // A directory in place of the file makes creation fail
        std::fs::create_dir(layout.table_path(Channel::BlueChroma)).unwrap();
        std::fs::create_dir(layout.dimensions_path()).unwrap();

        let analysis = analyzer.analyze_to_files(&gradient(8, 8)).unwrap();

        assert!(analysis.is_complete());
        assert_eq!(analysis.dump_failures.len(), 2);
        assert!(analysis
            .dump_failures
            .iter()
            .all(|e| matches!(e, DctqError::SinkUnavailable { .. })));
        for channel in Channel::ALL {
            assert_eq!(std::fs::metadata(layout.quantized_path(channel)).unwrap().len(), 64 * 2);
            assert_eq!(std::fs::metadata(layout.residual_path(channel)).unwrap().len(), 64 * 4);
        }
        assert!(layout.table_path(Channel::Luma).is_file());
        assert!(layout.table_path(Channel::RedChroma).is_file());
    }

    #[test]
    fn test_channel_dump() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = Analyzer::new(AnalyzerOptions::new().output_dir(dir.path()));
        let outcome = analyzer.run(Pipeline::ChannelDump, &gradient(3, 2)).unwrap();
        assert!(matches!(outcome, RunOutcome::Dumped));

        let red = std::fs::read_to_string(dir.path().join("R.txt")).unwrap();
        assert_eq!(red, "0 3 6\n7 10 13\n");
        assert!(dir.path().join("dim.txt").exists());
        assert!(!dir.path().join("qF_Y.raw").exists());
    }
}
