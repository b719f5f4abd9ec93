//! `pgsgen` — generate random Cypher `CREATE` statements from a
//! PG-Schema definition, for quick test or demo datasets.

#![warn(missing_debug_implementations, rust_2018_idioms)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod counts;
pub mod error;
pub mod gen;
pub mod parser;
