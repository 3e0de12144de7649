pub mod calculator;
pub mod catalog;
pub mod publisher;
pub mod session;

pub use crate::domain::model::{Quote, SelectionItem};
pub use crate::domain::ports::{ConfigProvider, DocumentRenderer, Storage};
pub use crate::utils::error::Result;
