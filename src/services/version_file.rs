use std::fs;
use std::path::{Path, PathBuf};
use crate::services::version_codec::VersionCodec;
use crate::utils::bump::{Bump, VersionTriple};
use crate::utils::errors::Result;

/// Result of a `set` or `bump` on a build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub previous: VersionTriple,
    pub next: VersionTriple,
    /// Whether the rewritten text differs from what was on disk.
    pub changed: bool,
}

/// A build file loaded into memory together with the codec that reads it.
pub struct VersionFile {
    path: PathBuf,
    contents: String,
    codec: VersionCodec,
    dry_run: bool,
}

impl VersionFile {
    pub fn open(path: impl AsRef<Path>, codec: VersionCodec) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        log::debug!("Read {} ({} bytes)", path.display(), contents.len());

        Ok(Self {
            path,
            contents,
            codec,
            dry_run: false,
        })
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn current(&self) -> Result<VersionTriple> {
        Ok(self.codec.scan(&self.contents).to_triple()?)
    }

    pub fn set(&mut self, version: &str) -> Result<Outcome> {
        let next = VersionTriple::parse(version)?;
        self.apply(next)
    }

    pub fn bump(&mut self, kind: Bump) -> Result<Outcome> {
        let next = self.current()?.bump(kind)?;
        self.apply(next)
    }

    fn apply(&mut self, next: VersionTriple) -> Result<Outcome> {
        let previous = self.current()?;
        let updated = self.codec.write(&self.contents, &next.to_string());
        let changed = updated != self.contents;

        if !changed {
            log::info!("{} already at version {}", self.path.display(), next);
        } else if self.dry_run {
            log::info!("Dry run: would update {} from {} to {}", self.path.display(), previous, next);
        } else {
            fs::write(&self.path, &updated)?;
            log::info!("Updated {} from {} to {}", self.path.display(), previous, next);
            self.contents = updated;
        }

        Ok(Outcome { previous, next, changed })
    }
}
