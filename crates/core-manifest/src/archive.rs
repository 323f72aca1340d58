//! Content-addressed archive construction
//!
//! Packages the exact raw manifest bytes (never the flattened or rendered
//! result) as `MAGIC_HEADER || gzip(tar(single entry))` and computes a
//! SHA-256 digest over the prefixed payload. Identical input bytes always
//! yield identical archives: the tar header is pinned (mtime 0, uid/gid 0,
//! mode 0644) and the gzip header carries no timestamp, so the digest is a
//! pure function of the input.

use crate::error::Result;
use crate::{ARCHIVE_EXT, MAGIC_HEADER, MANIFEST_FILE};
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The packaging result for one build invocation. Never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path of the written archive file
    pub path: PathBuf,
    /// Bytes written
    pub size: u64,
    /// Content digest, formatted as `sha256:<hex>`
    pub digest: String,
}

/// Build a distribution archive from raw manifest bytes.
///
/// Writes `<name>-<version>.promptbucket` into `out_dir` and returns the
/// recorded [`Artifact`]. Any I/O or encoding failure aborts the build;
/// partial output files are not cleaned up.
pub fn build_archive(
    raw_bytes: &[u8],
    name: &str,
    version: &str,
    out_dir: &Path,
) -> Result<Artifact> {
    let payload = archive_payload(raw_bytes)?;
    let digest = payload_digest(&payload);

    let path = out_dir.join(format!("{}-{}.{}", name, version, ARCHIVE_EXT));
    fs::write(&path, &payload)?;
    let size = fs::metadata(&path)?.len();

    info!(path = %path.display(), size, %digest, "built archive");
    Ok(Artifact { path, size, digest })
}

/// Produce the full archive byte stream: magic header, then the gzipped
/// single-entry tar of the raw manifest bytes.
pub fn archive_payload(raw_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut header = tar::Header::new_ustar();
    header.set_path(MANIFEST_FILE)?;
    header.set_size(raw_bytes.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);
    header.set_cksum();

    let mut builder = tar::Builder::new(Vec::new());
    builder.append(&header, raw_bytes)?;
    let tar_bytes = builder.into_inner()?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    std::io::Write::write_all(&mut encoder, &tar_bytes)?;
    let gz_bytes = encoder.finish()?;

    let mut payload = Vec::with_capacity(MAGIC_HEADER.len() + gz_bytes.len());
    payload.extend_from_slice(MAGIC_HEADER);
    payload.extend_from_slice(&gz_bytes);
    Ok(payload)
}

/// Digest of the header-plus-compressed payload, as `sha256:<hex>`.
pub fn payload_digest(payload: &[u8]) -> String {
    let sum = Sha256::digest(payload);
    format!("sha256:{}", hex::encode(sum))
}
