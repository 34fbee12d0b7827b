//! The `--cpuprofile` hook.
//!
//! Without the `pprof` feature the profile is a JSON summary of the run
//! (wall time plus the scan report). With it, a sampling profiler runs for
//! the lifetime of the [`CpuProfile`] and a flamegraph SVG is written on
//! [`CpuProfile::finish`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::utils::error::{ConversionError, ConversionOutput, ConversionResult};
use crate::utils::report::ScanReport;

#[cfg(feature = "pprof")]
const SAMPLE_FREQUENCY: i32 = 1000;

/// JSON run profile written when the `pprof` feature is off.
#[derive(Debug, Clone, Serialize)]
pub struct RunProfile {
    pub elapsed_micros: u64,
    pub warnings: usize,
    pub report: ScanReport,
}

pub struct CpuProfile {
    path: PathBuf,
    started: Instant,
    #[cfg(feature = "pprof")]
    guard: pprof::ProfilerGuard<'static>,
}

impl CpuProfile {
    /// Starts profiling. The output file is created up front so a bad path
    /// is reported before the conversion runs.
    pub fn start(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let path = path.as_ref().to_path_buf();
        fs::File::create(&path).map_err(|e| ConversionError::io_at(&path, e))?;

        #[cfg(feature = "pprof")]
        let guard = pprof::ProfilerGuardBuilder::default()
            .frequency(SAMPLE_FREQUENCY)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()
            .map_err(|e| ConversionError::profile(e.to_string()))?;

        log::debug!("profiling to {}", path.display());
        Ok(CpuProfile {
            path,
            started: Instant::now(),
            #[cfg(feature = "pprof")]
            guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stops profiling without writing anything and removes the file
    /// created by [`CpuProfile::start`].
    pub fn discard(self) -> ConversionResult<()> {
        fs::remove_file(&self.path).map_err(|e| ConversionError::io_at(&self.path, e))
    }

    /// Stops profiling and writes the profile.
    #[cfg(not(feature = "pprof"))]
    pub fn finish(self, output: &ConversionOutput) -> ConversionResult<()> {
        let profile = RunProfile {
            elapsed_micros: u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX),
            warnings: output.warnings.len(),
            report: output.report,
        };
        let serialized = serde_json::to_string_pretty(&profile)
            .map_err(|e| ConversionError::profile(e.to_string()))?;
        fs::write(&self.path, serialized).map_err(|e| ConversionError::io_at(&self.path, e))
    }

    /// Stops profiling and writes the profile.
    #[cfg(feature = "pprof")]
    pub fn finish(self, output: &ConversionOutput) -> ConversionResult<()> {
        log::debug!(
            "profiled {} code points in {:?}",
            output.report.input_code_points,
            self.started.elapsed()
        );
        let report = self
            .guard
            .report()
            .build()
            .map_err(|e| ConversionError::profile(e.to_string()))?;
        let file = fs::File::create(&self.path).map_err(|e| ConversionError::io_at(&self.path, e))?;
        report
            .flamegraph(file)
            .map_err(|e| ConversionError::profile(e.to_string()))
    }
}

#[cfg(all(test, not(feature = "pprof")))]
mod tests {
    use super::*;
    use crate::convert_with_report;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sxmd-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_writes_json_profile() {
        let path = temp_path("profile.json");
        let profile = CpuProfile::start(&path).unwrap();
        assert_eq!(profile.path(), path.as_path());

        let output = convert_with_report("\\alpha{x} and <![CDATA[gone]]>");
        profile.finish(&output).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["report"]["latex_commands"], 1);
        assert_eq!(written["report"]["cdata_sections"], 1);
        assert_eq!(written["warnings"], 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_discard_removes_file() {
        let path = temp_path("discarded.json");
        let profile = CpuProfile::start(&path).unwrap();
        assert!(path.exists());
        profile.discard().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_bad_path_fails_at_start() {
        let path = temp_path("missing-dir").join("profile.json");
        let err = CpuProfile::start(&path).err().unwrap();
        assert_eq!(err.path(), Some(path.as_path()));
    }
}
