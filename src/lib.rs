pub mod adapters;
#[cfg(feature = "cli")]
pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{BundleRenderer, LocalStorage, PdfRenderer, SimplePdfRenderer};
pub use config::EstimatorConfig;
pub use core::{
    calculator::QuoteCalculator, catalog::Catalog, publisher::DocumentPublisher,
    session::QuoteSession,
};
pub use domain::selection::{SelectionChange, Selections};
pub use utils::error::{QuoteError, Result};
