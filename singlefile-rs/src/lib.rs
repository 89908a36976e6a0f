//! Package JavaScript modules and assets into one self-contained HTML file.
//!
//! Every input is embedded as a `data:` URI in an import map keyed by its
//! path relative to a root directory. Relative imports inside scripts are
//! rewritten to those keys, and the import map is injected into a host
//! HTML document just before `</head>`.
//!
//! ```rust,ignore
//! use singlefile_rs::{BundleConfig, Bundler, OutputMode};
//!
//! let mode = OutputMode::from_flags(false, Some("web/index.html".into()), None)?;
//! let config = BundleConfig::new(vec!["web/main.js".into()], "web", mode);
//! Bundler::new(config).run()?;
//! ```

pub mod bundler;
pub mod config;
pub mod error;
pub mod flatten;
pub mod html;
pub mod import_map;
pub mod loader;
pub mod mime;
pub mod specifier;

#[macro_use]
extern crate lazy_static;

pub use bundler::{Bundler, RunOutput};
pub use config::{BundleConfig, OutputMode};
pub use error::{SingleFileError, SingleFileResult};
pub use flatten::{ImportRewriter, RegexImportRewriter};
pub use import_map::ImportMap;
pub use mime::ContentKind;
