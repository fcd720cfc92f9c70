//! Blob object
//!
//! A blob is a snapshot of one working-directory file: its raw bytes together with the
//! path it was read from. The name takes part in the identity, so identical content
//! stored under two paths yields two distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<name>\0<content>`
//! Identity: `sha1(content) ++ sha1(name)` in hex (80 characters)

use crate::artifacts::objects::object::{Object, Packable, Unpackable, hex_digest, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Path of the file relative to the working directory root
    name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::with_capacity(self.name.len() + 1 + self.content.len());
        body.extend_from_slice(self.name.as_bytes());
        body.push(b'\0');
        body.extend_from_slice(&self.content);

        Ok(with_header(self.object_type(), &body))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name = Vec::new();
        reader
            .read_until(b'\0', &mut name)
            .context("Invalid blob object: missing name")?;
        if name.pop() != Some(b'\0') {
            anyhow::bail!("Invalid blob object: unterminated name");
        }
        let name = String::from_utf8(name).context("Invalid blob object: name is not UTF-8")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(name, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        ObjectId::try_parse(format!(
            "{}{}",
            hex_digest(&self.content),
            hex_digest(self.name.as_bytes())
        ))
    }
}
