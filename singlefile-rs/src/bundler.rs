use crate::config::{BundleConfig, OutputMode};
use crate::error::{SingleFileError, SingleFileResult};
use crate::flatten::{strip_source_map_url, ImportRewriter, RegexImportRewriter};
use crate::html::inject_before_head_close;
use crate::import_map::ImportMap;
use crate::loader::{load_content, Content};
use crate::mime::ContentKind;
use crate::specifier::flat_specifier;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    /// Map-only mode: the import map script tag, for standard output.
    ImportMap(String),
    /// Bundle mode: path of the written document.
    Bundle(PathBuf),
}

/// Packages the inputs of one [`BundleConfig`] into an import map.
pub struct Bundler {
    config: BundleConfig,
    rewriter: Box<dyn ImportRewriter>,
}

impl Bundler {
    pub fn new(config: BundleConfig) -> Self {
        Self::with_rewriter(config, RegexImportRewriter)
    }

    pub fn with_rewriter(config: BundleConfig, rewriter: impl ImportRewriter + 'static) -> Self {
        Self {
            config,
            rewriter: Box::new(rewriter),
        }
    }

    /// Validate the configuration, build the map and emit it.
    pub fn run(&self) -> SingleFileResult<RunOutput> {
        self.config.validate()?;
        let import_map = self.build_import_map()?;
        let tag = import_map.to_script_tag();

        match &self.config.mode {
            OutputMode::MapOnly => Ok(RunOutput::ImportMap(tag)),
            OutputMode::Bundle {
                html_file,
                output_file,
            } => {
                write_bundle(html_file, output_file, &tag)?;
                info!(
                    "Wrote {} modules to {}",
                    import_map.len(),
                    output_file.display()
                );
                Ok(RunOutput::Bundle(output_file.clone()))
            }
        }
    }

    /// Process every input, in order, into a fresh import map.
    ///
    /// All flat specifiers are computed before the first file is read so
    /// that an input outside the root fails without any I/O.
    pub fn build_import_map(&self) -> SingleFileResult<ImportMap> {
        let specifiers = self
            .config
            .input_files
            .iter()
            .map(|file| flat_specifier(&self.config.root, file))
            .collect::<SingleFileResult<Vec<_>>>()?;

        let mut import_map = ImportMap::new();
        for (file, specifier) in self.config.input_files.iter().zip(specifiers) {
            self.add_file(&mut import_map, file, &specifier)?;
        }
        Ok(import_map)
    }

    fn add_file(
        &self,
        import_map: &mut ImportMap,
        file: &Path,
        specifier: &str,
    ) -> SingleFileResult<()> {
        let kind = ContentKind::from_path(file);
        let content = match (kind, load_content(file, kind)?) {
            (ContentKind::Script, Content::Text(source)) => {
                let stripped = strip_source_map_url(&source);
                if stripped.len() != source.len() {
                    debug!("{specifier}: stripped sourceMappingURL directive");
                }
                Content::Text(self.rewriter.rewrite(specifier, &stripped))
            }
            (_, content) => content,
        };
        import_map.insert(specifier, kind, &content);
        Ok(())
    }
}

/// Inject `tag` into the host document and write the result to `output_file`.
///
/// The document is written to a temporary file next to the destination and
/// then moved into place, so a failed run never leaves a partial bundle.
pub fn write_bundle(html_file: &Path, output_file: &Path, tag: &str) -> SingleFileResult<()> {
    let html =
        fs::read_to_string(html_file).map_err(|e| SingleFileError::file_access(html_file, e))?;
    let bundled = inject_before_head_close(&html, tag, html_file)?;

    let out_dir = match output_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".singlefile");
    // Created like a plain `File::create`, subject to the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(out_dir)
        .map_err(|e| SingleFileError::file_access(output_file, e))?;

    // A replaced bundle keeps the permissions of the file it replaces
    if let Ok(existing) = fs::metadata(output_file) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| SingleFileError::file_access(output_file, e))?;
    }
    tmp.write_all(bundled.as_bytes())
        .map_err(|e| SingleFileError::file_access(output_file, e))?;
    tmp.persist(output_file)
        .map_err(|e| SingleFileError::file_access(output_file, e.error))?;
    Ok(())
}
