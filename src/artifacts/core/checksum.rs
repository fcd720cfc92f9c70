//! Checksummed file access
//!
//! The registry file is a variable-length text body followed by the SHA-1 of that body.
//! [`Checksum`] wraps a locked file: writes are fed through the digest and sealed with
//! the trailer, reads split the trailer off and verify it before handing back the body.

use anyhow::anyhow;
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Size of the SHA-1 trailer in bytes
pub const CHECKSUM_SIZE: usize = 20;

#[derive(Debug)]
pub struct Checksum<'f> {
    file: FileGuard<&'f mut std::fs::File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written so far
    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .deref_mut()
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to registry file"))?;

        Ok(())
    }

    /// Read the whole file and return the body once its trailer has been verified
    pub fn read_verified(&mut self) -> anyhow::Result<Bytes> {
        let mut content = Vec::new();
        self.file.deref_mut().read_to_end(&mut content)?;

        if content.len() < CHECKSUM_SIZE {
            return Err(anyhow!("Unexpected end-of-file while reading registry"));
        }

        let expected_checksum = content.split_off(content.len() - CHECKSUM_SIZE);
        self.digest.update(&content);
        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum.as_slice() != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(Bytes::from(content))
    }
}
