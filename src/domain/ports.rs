use crate::domain::model::{Letterhead, Quote, RenderedDocument};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn render_timeout(&self) -> Duration;
    fn letterhead(&self) -> &Letterhead;
}

/// Turns a quote into a printable file. Layout is entirely the renderer's concern.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Resolves once the renderer can accept work.
    async fn ready(&self) -> Result<()>;

    async fn render(&self, quote: &Quote) -> Result<RenderedDocument>;
}
