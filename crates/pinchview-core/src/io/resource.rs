use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::GIF_EXTENSION;
use crate::error::{PreviewError, Result};

/// A directory of named resources shipped with the host application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resource_path(&self, name: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{name}.{extension}"))
    }
}

impl std::fmt::Display for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

/// Looks up resource bytes by name. A missing resource is
/// [`PreviewError::ResourceNotFound`]; no alternate locations are searched.
pub trait ResourceLoader {
    fn load_bytes(&self, name: &str, bundle: &Bundle) -> Result<Vec<u8>>;
}

/// Reads `<bundle>/<name>.<extension>` from the file system.
#[derive(Clone, Debug)]
pub struct FsLoader {
    extension: String,
}

impl FsLoader {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn gif() -> Self {
        Self::new(GIF_EXTENSION)
    }
}

impl ResourceLoader for FsLoader {
    fn load_bytes(&self, name: &str, bundle: &Bundle) -> Result<Vec<u8>> {
        let path = bundle.resource_path(name, &self.extension);
        match std::fs::read(&path) {
            Ok(bytes) => {
                info!(path = %path.display(), bytes = bytes.len(), "Loaded resource");
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PreviewError::ResourceNotFound {
                name: format!("{name}.{}", self.extension),
                location: bundle.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
