//! Core business logic for grantha exports.
//!
//! # Modules
//!
//! - [`normalize`] - Scalar and image-name normalization rules
//! - [`records`] - Deck, manuscript and image record builders
//! - [`export`] - CSV rendering, sink writes and export summaries
//!
//! # Export Workflow
//!
//! 1. **Validate**: Check ids and shape of the incoming [`crate::domain::ExportRequest`]
//! 2. **Build**: Derive the three record sets from the validated deck graph
//! 3. **Render**: Serialize each record set as CSV text with a fixed header
//! 4. **Write**: Hand all three tables to the configured output sink
//! 5. **Report**: Return the file envelope and a per-table summary
//!
//! # Example
//!
//! ```rust,no_run
//! use grantha_export::config::load_config;
//! use grantha_export::core::export::ExportCoordinator;
//! use grantha_export::domain::{ExportRequest, OwnerKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("grantha.toml")?;
//! let coordinator = ExportCoordinator::from_config(&config, false).await?;
//!
//! let request = ExportRequest::from_json(&std::fs::read_to_string("deck.json")?)?;
//! let outcome = coordinator.export(&OwnerKey::new("u42")?, &request).await?;
//!
//! println!("{}", outcome.envelope.message);
//! println!("Rows written: {}", outcome.summary.total_rows());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod normalize;
pub mod records;
