// Adapters layer: concrete implementations of the domain ports (document renderers, storage).

pub mod render;
pub mod storage;

pub use render::{BundleRenderer, PdfRenderer, SimplePdfRenderer};
pub use storage::LocalStorage;
