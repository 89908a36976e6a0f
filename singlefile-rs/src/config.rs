use crate::error::{SingleFileError, SingleFileResult};
use crate::html::default_output_path;
use std::path::PathBuf;

/// What a run produces. Exactly one mode is selected per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Print the import map script tag and stop.
    MapOnly,
    /// Inject the import map into `html_file` and write it to `output_file`.
    Bundle {
        html_file: PathBuf,
        output_file: PathBuf,
    },
}

impl OutputMode {
    /// Select the mode from the command line flags.
    ///
    /// Selecting both map-only and a host document, or neither, is a
    /// configuration error. Without an explicit output the bundle is written
    /// next to the host document as `<name>.onefile.html`.
    pub fn from_flags(
        map_only: bool,
        html_file: Option<PathBuf>,
        output_file: Option<PathBuf>,
    ) -> SingleFileResult<Self> {
        match (map_only, html_file) {
            (true, None) => Ok(OutputMode::MapOnly),
            (false, Some(html_file)) => {
                let output_file = output_file.unwrap_or_else(|| default_output_path(&html_file));
                Ok(OutputMode::Bundle {
                    html_file,
                    output_file,
                })
            }
            _ => Err(SingleFileError::Configuration(
                "You must either specify an HTML file with -s OR use -m to only show the import map."
                    .to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub input_files: Vec<PathBuf>,
    pub root: PathBuf,
    pub mode: OutputMode,
}

impl BundleConfig {
    pub fn new(input_files: Vec<PathBuf>, root: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            input_files,
            root: root.into(),
            mode,
        }
    }

    /// Check every path before anything is read.
    pub fn validate(&self) -> SingleFileResult<()> {
        if self.input_files.is_empty() {
            return Err(SingleFileError::Configuration(
                "At least one input file is required.".to_string(),
            ));
        }

        for file in &self.input_files {
            if !file.is_file() {
                return Err(SingleFileError::Configuration(format!(
                    "Input file '{}' does not exist or is not a file.",
                    file.display()
                )));
            }
        }

        if !self.root.is_dir() {
            return Err(SingleFileError::Configuration(format!(
                "Root path '{}' does not exist or is not a directory.",
                self.root.display()
            )));
        }

        if let OutputMode::Bundle {
            html_file,
            output_file,
        } = &self.mode
        {
            if output_file.exists() && !output_file.is_file() {
                return Err(SingleFileError::Configuration(format!(
                    "Output file '{}' already exists, but is not a file.",
                    output_file.display()
                )));
            }
            if !html_file.is_file() {
                return Err(SingleFileError::Configuration(format!(
                    "HTML file '{}' does not exist or is not a file.",
                    html_file.display()
                )));
            }
        }

        Ok(())
    }
}
