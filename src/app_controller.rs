use anyhow::{anyhow, Context, Result};
use log::{error, warn, info, debug};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::lyric_processor::{InfoMap, LyricDocument, LyricProcessor};

// @module: Application controller for lyric file processing

/// Result of processing a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The formatted document was written to this path
    Written(PathBuf),
    /// The output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counters for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Overview of a lyric file's content
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    // @field: Metadata tags
    pub info: InfoMap,
    // @field: Number of lyric lines
    pub total_lines: usize,
    // @field: Number of lyric lines with a time tag
    pub timed_lines: usize,
}

impl DocumentSummary {
    pub fn from_document(document: &LyricDocument) -> Self {
        DocumentSummary {
            info: document.infos().clone(),
            total_lines: document.lyrics().len(),
            timed_lines: document.timed_count(),
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, value) in &self.info {
            writeln!(f, "{}: {}", key, value)?;
        }
        writeln!(f, "Lines: {} ({} timed, {} plain)",
            self.total_lines, self.timed_lines, self.total_lines - self.timed_lines)
    }
}

/// Main application controller for lyric formatting
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a file and apply the configured edits
    pub fn load_document(&self, input_file: &Path) -> Result<LyricProcessor> {
        let mut processor = LyricProcessor::with_options(self.config.format.clone());
        processor.load_file(input_file)?;

        let document = processor.document_mut();
        if self.config.processing.strip_tags {
            document.remove_tags();
        }
        if self.config.processing.remove_empty {
            document.remove_empty();
        }

        Ok(processor)
    }

    /// Summarize the content of a lyric file
    pub fn describe(&self, input_file: &Path) -> Result<DocumentSummary> {
        let document = LyricDocument::parse(&FileManager::read_lyric_file(input_file)?);
        Ok(DocumentSummary::from_document(&document))
    }

    /// Output path for a lyric file
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.processing.output_suffix,
            &self.config.processing.extension,
        )
    }

    /// Format one lyric file into the output directory.
    /// Without an output directory the file is written next to its input.
    pub fn run(&self, input_file: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<ProcessOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_dir = output_dir
            .or_else(|| input_file.parent())
            .unwrap_or(Path::new("."));
        let output_path = self.output_path_for(input_file, output_dir);

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(ProcessOutcome::Skipped(output_path));
        }

        let processor = self.load_document(input_file)
            .with_context(|| format!("Failed to load lyric file: {}", input_file.display()))?;
        debug!("Loaded {} lines from {:?}", processor.document().lyrics().len(), input_file);

        processor.save_file(&output_path)?;
        info!("Success: {:?}", output_path);

        Ok(ProcessOutcome::Written(output_path))
    }

    /// Format every lyric file below a directory.
    ///
    /// Outputs land next to their inputs unless an output directory is given.
    /// Files that look like earlier outputs (stem ending in the output suffix)
    /// are ignored, and a failure on one file does not stop the run.
    pub fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        if let Some(output_dir) = output_dir {
            FileManager::ensure_dir(output_dir)?;
        }

        let lyric_files: Vec<PathBuf> = FileManager::find_files(input_dir, &self.config.processing.extension)?
            .into_iter()
            .filter(|path| !self.is_output_file(path))
            .collect();

        if lyric_files.is_empty() {
            return Err(anyhow!("No lyric files found in directory: {:?}", input_dir));
        }

        let mut summary = FolderSummary::default();
        for lyric_file in &lyric_files {
            match self.run(lyric_file, output_dir, force_overwrite) {
                Ok(ProcessOutcome::Written(_)) => summary.processed += 1,
                Ok(ProcessOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", lyric_file, e);
                    summary.errors += 1;
                }
            }
        }

        info!("Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed, summary.skipped, summary.errors, Self::format_duration(start_time.elapsed()));

        Ok(summary)
    }

    fn is_output_file(&self, path: &Path) -> bool {
        let suffix = &self.config.processing.output_suffix;
        !suffix.is_empty() && path.file_stem()
            .map(|stem| stem.to_string_lossy().ends_with(&format!(".{}", suffix)))
            .unwrap_or(false)
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
