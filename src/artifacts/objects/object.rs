use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        ObjectId::try_parse(hex_digest(&content))
    }
}

/// Hex-encoded SHA-1 of `data`
pub fn hex_digest(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Prefix `body` with the `<type> <size>\0` header shared by all objects
pub fn with_header(object_type: ObjectType, body: &[u8]) -> Bytes {
    let mut object_bytes = format!("{} {}\0", object_type.as_str(), body.len()).into_bytes();
    object_bytes.extend_from_slice(body);

    Bytes::from(object_bytes)
}
