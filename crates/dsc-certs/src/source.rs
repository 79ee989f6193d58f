//! Enumeration of certificate input sets.
//!
//! Every read failure is fatal. A build over a silently partial input set would commit
//! to a root that looks valid but is missing certificates.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

/// File looked up in each subdirectory of a mock set.
pub const MOCK_CERTIFICATE_FILE: &str = "mock_dsc.pem";

/// Where the certificates of a build come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateSet {
    /// Production masterlist: every regular file in the directory.
    Masterlist(PathBuf),
    /// Development mocks: `<dir>/<name>/mock_dsc.pem` for each subdirectory that has one.
    Mock(PathBuf),
}

impl CertificateSet {
    /// Root directory of the set.
    #[must_use]
    pub fn root(&self) -> &Path {
        match self {
            Self::Masterlist(dir) | Self::Mock(dir) => dir,
        }
    }
}

/// Certificate bytes together with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCertificate {
    /// Path relative to the root of the set.
    pub identifier: String,
    /// PEM or DER content.
    pub bytes: Vec<u8>,
}

/// Errors raised while reading a certificate set.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The set directory cannot be listed.
    #[error("Failed to list {}: {source}", path.display())]
    List {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A certificate file cannot be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Read every certificate of a set, sorted by identifier.
///
/// # Errors
/// Returns a [`SourceError`] if the directory cannot be listed or any file cannot be read.
#[instrument(skip_all, fields(root = %set.root().display()))]
pub async fn read_certificate_set(set: &CertificateSet) -> Result<Vec<RawCertificate>, SourceError> {
    let mut certificates = match set {
        CertificateSet::Masterlist(dir) => read_masterlist(dir).await?,
        CertificateSet::Mock(dir) => read_mocks(dir).await?,
    };
    certificates.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    info!(count = certificates.len(), "Read certificate set");
    Ok(certificates)
}

async fn read_masterlist(dir: &Path) -> Result<Vec<RawCertificate>, SourceError> {
    let mut certificates = Vec::new();
    for (name, path, file_type) in list(dir).await? {
        if !file_type.is_file() {
            debug!(entry = %path.display(), "Skipping non-file entry");
            continue;
        }
        let bytes = read(&path).await?;
        certificates.push(RawCertificate {
            identifier: name,
            bytes,
        });
    }
    Ok(certificates)
}

async fn read_mocks(dir: &Path) -> Result<Vec<RawCertificate>, SourceError> {
    let mut certificates = Vec::new();
    for (name, path, file_type) in list(dir).await? {
        if !file_type.is_dir() {
            continue;
        }
        let pem = path.join(MOCK_CERTIFICATE_FILE);
        let exists = fs::try_exists(&pem)
            .await
            .map_err(|source| SourceError::Read {
                path: pem.clone(),
                source,
            })?;
        if !exists {
            debug!(dir = %path.display(), "No mock certificate");
            continue;
        }
        let bytes = read(&pem).await?;
        certificates.push(RawCertificate {
            identifier: format!("{name}/{MOCK_CERTIFICATE_FILE}"),
            bytes,
        });
    }
    Ok(certificates)
}

async fn list(dir: &Path) -> Result<Vec<(String, PathBuf, std::fs::FileType)>, SourceError> {
    let list_error = |source| SourceError::List {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir).await.map_err(list_error)?;
    let mut listed = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
        let file_type = entry.file_type().await.map_err(list_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        listed.push((name, entry.path(), file_type));
    }
    Ok(listed)
}

async fn read(path: &Path) -> Result<Vec<u8>, SourceError> {
    fs::read(path).await.map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}
