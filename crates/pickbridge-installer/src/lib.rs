//! pickbridge-installer - Plugin archive extraction and layout normalization
//!
//! Plugin archives arrive in inconsistent shapes: some carry their content
//! directories (`data/`, `images/`, `sounds/`) directly at the archive root
//! ("flat"), others wrap everything in one extra top-level folder the way
//! GitHub zips do ("nested"). The [`Installer`] extracts an archive under a
//! destination root and rearranges either shape into the single canonical
//! layout the plugin loader expects:
//!
//! ```text
//! dest_root/<plugin-name>/
//! ├── data/
//! ├── images/
//! └── sounds/
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pickbridge_installer::Installer;
//! use std::fs::File;
//!
//! let archive = File::open("myplugin.zip")?;
//! let installed = Installer::new("/plugins").install(archive, Some("myplugin"))?;
//! println!("installed at {}", installed.display());
//! # Ok::<(), pickbridge_installer::InstallError>(())
//! ```

mod error;
mod installer;
mod layout;

pub use error::{InstallError, InstallResult};
pub use installer::Installer;
pub use layout::{ArchiveLayout, CONTENT_MARKERS, strip_archive_suffix};
