//! Export file ingestion.
//!
//! This crate turns the files handed to a run into [`RawGrid`]s. Nothing here
//! interprets headers or dates; that is the job of `tabfix-transform`.
//!
//! # Features
//!
//! - **Delimited text**: `.csv`, `.txt` (comma) and `.tsv` (tab), UTF-8 or BOM-marked UTF-16
//! - **Spreadsheets**: `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`; first sheet, native cell types kept
//! - **Discovery**: expand directories into the supported files they contain
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tabfix_ingest::{discover_files, read_grid};
//!
//! let discovery = discover_files(&[PathBuf::from("exports")]);
//! for file in &discovery.files {
//!     let grid = read_grid(&file.path)?;
//!     println!("{}: {} rows", file.name, grid.len());
//! }
//! ```
//!
//! [`RawGrid`]: tabfix_model::RawGrid

mod delimited;
mod discovery;
mod error;
mod source;
mod xlsx;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use delimited::{decode_text, read_delimited, read_delimited_bytes};
pub use source::{SourceKind, read_grid};
pub use xlsx::read_spreadsheet;

// === File Discovery ===
pub use discovery::{DiscoveredFile, Discovery, RejectedInput, discover_files};
