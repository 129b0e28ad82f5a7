//! Plugin archive installation.
//!
//! The [`Installer`] extracts a zip archive into a temporary directory under
//! the destination root, classifies the archive layout while scanning, and
//! then normalizes the result into `dest_root/<name>/` regardless of how the
//! archive arranged its content.

use crate::layout::{ArchiveLayout, is_content_marker};
use crate::{InstallError, InstallResult};
use pickbridge_core::CollisionPolicy;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extracts plugin archives and normalizes their layout.
///
/// # Example
///
/// ```no_run
/// use pickbridge_core::CollisionPolicy;
/// use pickbridge_installer::Installer;
/// use std::fs::File;
///
/// let installer = Installer::new("/plugins").with_collision_policy(CollisionPolicy::Fail);
/// let archive = File::open("myplugin.zip")?;
/// let installed = installer.install(archive, Some("myplugin"))?;
/// # Ok::<(), pickbridge_installer::InstallError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Installer {
    dest_root: PathBuf,
    collision_policy: CollisionPolicy,
}

impl Installer {
    /// Create an installer targeting the given destination root.
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
            collision_policy: CollisionPolicy::default(),
        }
    }

    /// Set the behavior for install-path collisions.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// The destination root this installer writes under.
    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Extract `reader` and normalize the result into the canonical layout.
    ///
    /// `display_name` is the human-readable archive name with any `.zip`
    /// suffix already stripped; when `None`, extraction goes directly into
    /// the destination root and no named plugin directory is created.
    ///
    /// Returns the final installed root. On failure, whatever was extracted
    /// before the error is left on disk; there is no rollback.
    pub fn install<R: Read + Seek>(
        &self,
        reader: R,
        display_name: Option<&str>,
    ) -> InstallResult<PathBuf> {
        let temp_root = match display_name {
            Some(name) => self.dest_root.join(format!("tmp_{name}")),
            None => self.dest_root.clone(),
        };

        let mut archive = ZipArchive::new(reader)?;
        fs::create_dir_all(&temp_root)?;

        // One pass: extract every entry and classify the layout as we go.
        let mut layout = ArchiveLayout::Nested;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if is_content_marker(entry.name()) {
                layout = ArchiveLayout::Flat;
            }

            let Some(relative) = entry.enclosed_name() else {
                return Err(InstallError::UnsafeEntryPath(entry.name().to_string()));
            };
            let out_path = temp_root.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
            } else {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out_file = fs::File::create(&out_path)?;
                std::io::copy(&mut entry, &mut out_file)?;
            }
            tracing::trace!(entry = entry.name(), "extracted archive entry");
        }

        let installed = self.normalize(&temp_root, layout, display_name)?;
        tracing::info!(
            path = %installed.display(),
            ?layout,
            "plugin archive installed"
        );
        Ok(installed)
    }

    /// Rearrange the extracted tree into `dest_root/<name>/`.
    fn normalize(
        &self,
        temp_root: &Path,
        layout: ArchiveLayout,
        display_name: Option<&str>,
    ) -> InstallResult<PathBuf> {
        match layout {
            ArchiveLayout::Nested => {
                // Content is wrapped one level deep; hoist every immediate
                // child of the temp root into the destination root.
                if temp_root != self.dest_root {
                    for child in fs::read_dir(temp_root)? {
                        let child = child?;
                        let target = self.dest_root.join(child.file_name());
                        self.place(&child.path(), &target)?;
                    }
                    fs::remove_dir(temp_root)?;
                }
                Ok(self.dest_root.clone())
            }
            ArchiveLayout::Flat => match display_name {
                // Content already has the right shape; the temp root just
                // needs its final name.
                Some(name) => self.place(temp_root, &self.dest_root.join(name)),
                None => Ok(self.dest_root.clone()),
            },
        }
    }

    /// Move `src` to `target`, applying the collision policy.
    fn place(&self, src: &Path, target: &Path) -> InstallResult<PathBuf> {
        let target = if target.exists() {
            match self.collision_policy {
                CollisionPolicy::Fail => {
                    return Err(InstallError::AlreadyInstalled(target.to_path_buf()));
                }
                CollisionPolicy::Overwrite => {
                    tracing::debug!(path = %target.display(), "replacing existing install");
                    if target.is_dir() {
                        fs::remove_dir_all(target)?;
                    } else {
                        fs::remove_file(target)?;
                    }
                    target.to_path_buf()
                }
                CollisionPolicy::VersionSuffix => first_free_sibling(target),
            }
        } else {
            target.to_path_buf()
        };

        fs::rename(src, &target)?;
        Ok(target)
    }
}

/// First `<name>-N` sibling (N >= 2) that does not exist yet.
fn first_free_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut n = 2u32;
    loop {
        let candidate = target.with_file_name(format!("{name}-{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
