//! Error types of `pgsgen`.
//!
//! Only two things can fail a run: reading the schema file and writing
//! the generated statements. Everything else (malformed schema lines,
//! bad count rows, dangling relationship references, sampled self-loops)
//! degrades to a smaller result set by design.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The schema file could not be read. The only fatal input error.
    #[error("failed to read schema file '{}'", path.display())]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing generated statements to the output stream failed.
    #[error("failed to write statements")]
    Write(#[from] io::Error),
}
