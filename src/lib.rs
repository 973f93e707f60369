// Grantha Export - Palm-leaf manuscript deck CSV exporter
// Copyright (c) 2025 Grantha Export Contributors
// Licensed under the MIT License

//! # Grantha Export
//!
//! Normalizes the metadata of a scanned palm-leaf manuscript deck and exports
//! it as three CSV tables for archival import.
//!
//! ## Overview
//!
//! One export takes a deck (scan batch), its main manuscript's images and any
//! sub-manuscripts bound into the same deck, and produces:
//!
//! - **GranthaDeck** - exactly one row describing the deck
//! - **Grantha** - the main manuscript `"{deckId}_main_grantha"`, then one
//!   row per sub-manuscript in input order
//! - **ScannedImageAndProperties** - one row per image
//!
//! Missing or blank values are exported as `"Unknown"`, never as empty cells.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Normalization, record builders, export coordination
//! - [`adapters`] - Output sinks (filesystem, memory)
//! - [`domain`] - Input model, identifiers, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grantha_export::adapters::sink::MemorySink;
//! use grantha_export::core::export::{ExportCoordinator, ExportOptions};
//! use grantha_export::domain::{ExportRequest, ImageDescriptor, OwnerKey};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(MemorySink::new());
//!     let coordinator = ExportCoordinator::new(sink, ExportOptions::default());
//!
//!     let request = ExportRequest::builder("D1")
//!         .total_leaves(20)
//!         .stitch_type("non-stitch")
//!         .main_image(ImageDescriptor::new("a.jpg", "/x/a.jpg", ".jpg").with_dpi(600.0, 600.0))
//!         .build();
//!
//!     let outcome = coordinator.export(&OwnerKey::new("u42")?, &request).await?;
//!     println!("{}", serde_json::to_string(&outcome.envelope)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::GranthaError`]. Use
//! [`GranthaError::kind`](domain::GranthaError::kind) to tell rejected input
//! from storage failures, and
//! [`GranthaError::public_message`](domain::GranthaError::public_message)
//! before showing an error to an untrusted client.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
