//! External system integrations
//!
//! - [`sink`] - destinations for exported CSV tables
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern**: the export coordinator talks to
//! the [`sink::OutputSink`] trait, and concrete sinks are picked at startup by
//! [`sink::create_sink`]. Tests substitute their own implementations.
//!
//! ```rust,no_run
//! use grantha_export::adapters::sink::{FilesystemSink, OutputSink};
//! use grantha_export::domain::{Dataset, OwnerKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = FilesystemSink::new("./public/csv");
//! sink.prepare().await?;
//!
//! let owner = OwnerKey::new("u42")?;
//! let id = sink.write(Dataset::Deck, &owner, "grantha_deck_id\nD1\n").await?;
//! println!("wrote {id}");
//! # Ok(())
//! # }
//! ```

pub mod sink;
