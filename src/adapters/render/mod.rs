pub mod bundle;
pub mod pdf;
pub mod sheet;

pub use bundle::BundleRenderer;
pub use pdf::{PdfRenderer, SimplePdfRenderer};
pub use sheet::QuotationSheet;
