use crate::domain::model::{PublishedDocument, Quote, RenderedDocument};
use crate::domain::ports::{ConfigProvider, DocumentRenderer, Storage};
use crate::utils::error::{QuoteError, Result};
use std::time::Duration;

/// Hands a quote to the document renderers and stores what comes back.
///
/// The primary renderer gets one attempt. If it is not ready in time or fails
/// to render, the fallback renderer gets exactly one attempt before the
/// request is given up.
pub struct DocumentPublisher<P: DocumentRenderer, F: DocumentRenderer, S: Storage> {
    primary: P,
    fallback: F,
    storage: S,
    output_path: String,
    render_timeout: Duration,
}

impl<P: DocumentRenderer, F: DocumentRenderer, S: Storage> DocumentPublisher<P, F, S> {
    pub fn new<C: ConfigProvider>(primary: P, fallback: F, storage: S, config: &C) -> Self {
        Self {
            primary,
            fallback,
            storage,
            output_path: config.output_path().to_string(),
            render_timeout: config.render_timeout(),
        }
    }

    pub async fn publish(&self, quote: &Quote) -> Result<PublishedDocument> {
        if quote.is_empty() {
            tracing::warn!("No items selected for quote, nothing to render");
            return Err(QuoteError::EmptyQuote);
        }

        tracing::info!(
            "📄 Generating quotation with {} items (total {})",
            quote.items.len(),
            quote.total
        );

        let primary_attempt = self.render_with(&self.primary, quote).await;
        let (document, renderer, used_fallback) = match primary_attempt {
            Ok(document) => (document, self.primary.name(), false),
            Err(primary_error) => {
                tracing::error!("❌ Primary renderer failed: {}", primary_error);
                tracing::info!("🔁 Trying simplified renderer '{}'", self.fallback.name());

                match self.render_with(&self.fallback, quote).await {
                    Ok(document) => (document, self.fallback.name(), true),
                    Err(fallback_error) => {
                        tracing::error!("❌ Fallback renderer failed: {}", fallback_error);
                        return Err(QuoteError::DocumentGenerationFailed {
                            primary: primary_error.to_string(),
                            fallback: fallback_error.to_string(),
                        });
                    }
                }
            }
        };

        tracing::debug!(
            "Writing {} ({} bytes, {}) to storage",
            document.file_name,
            document.bytes.len(),
            document.media_type
        );
        self.storage
            .write_file(&document.file_name, &document.bytes)
            .await?;

        let path = format!("{}/{}", self.output_path, document.file_name);
        tracing::info!("📦 Quotation saved: {}", path);

        Ok(PublishedDocument {
            path,
            file_name: document.file_name,
            renderer: renderer.to_string(),
            used_fallback,
        })
    }

    async fn render_with<R: DocumentRenderer>(
        &self,
        renderer: &R,
        quote: &Quote,
    ) -> Result<RenderedDocument> {
        match tokio::time::timeout(self.render_timeout, renderer.ready()).await {
            Ok(ready) => ready?,
            Err(_) => {
                return Err(QuoteError::RendererUnavailable {
                    renderer: renderer.name().to_string(),
                    reason: format!("not ready after {}ms", self.render_timeout.as_millis()),
                })
            }
        }

        renderer.render(quote).await
    }
}
