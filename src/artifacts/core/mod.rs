//! Core utilities and shared types
//!
//! - `error`: the user-reportable [`error::RepositoryError`]
//! - `checksum`: SHA-1 sealed file access for the registry
//! - [`PagerWriter`]: `Write` adapter routing long output through the `minus` pager

pub mod checksum;
pub mod error;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// `log` and `global-log` can print the whole history; when stdout is a terminal the
/// binary hands the repository this writer instead of stdout and pages the result once
/// the command is done.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
