use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Where a cycle gets the raw product list body from.
#[async_trait]
pub trait ProductSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<Vec<u8>>;
}

#[async_trait]
impl<S: ProductSource + ?Sized> ProductSource for Arc<S> {
    async fn fetch(&self) -> Result<Vec<u8>> {
        (**self).fetch().await
    }
}
