//! Asset and style endpoints

use lumen_core::domain::asset::Asset;
use lumen_core::domain::style::Style;
use lumen_core::dto::listing::{AssetFilter, Page, Pagination};
use reqwest::Method;

use crate::HttpGateway;
use crate::error::Result;
use crate::require_id;

impl HttpGateway {
    // =============================================================================
    // Assets
    // =============================================================================

    /// List stored assets
    pub async fn list_assets(&self, filter: &AssetFilter) -> Result<Page<Asset>> {
        let url = self.endpoint(["v1", "assets"]);
        let response = self
            .request(Method::GET, url)
            .query(&filter.query_pairs())
            .send()
            .await?;

        self.handle_response(response, "assets").await
    }

    /// Get an asset by ID
    pub async fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        let asset_id = require_id(asset_id, "asset")?;
        let url = self.endpoint(["v1", "assets", asset_id]);
        let response = self.request(Method::GET, url).send().await?;

        self.handle_response(response, &format!("asset {}", asset_id))
            .await
    }

    /// Delete an asset; `false` when it was already gone
    pub async fn delete_asset(&self, asset_id: &str) -> Result<bool> {
        let asset_id = require_id(asset_id, "asset")?;
        let url = self.endpoint(["v1", "assets", asset_id]);
        let response = self.request(Method::DELETE, url).send().await?;

        self.handle_delete_response(response, &format!("asset {}", asset_id))
            .await
    }

    // =============================================================================
    // Styles
    // =============================================================================

    /// List trained styles
    pub async fn list_styles(&self, page: &Pagination) -> Result<Page<Style>> {
        let url = self.endpoint(["v1", "styles"]);
        let response = self
            .request(Method::GET, url)
            .query(&page.query_pairs())
            .send()
            .await?;

        self.handle_response(response, "styles").await
    }

    /// Get a style by ID
    pub async fn get_style(&self, style_id: &str) -> Result<Style> {
        let style_id = require_id(style_id, "style")?;
        let url = self.endpoint(["v1", "styles", style_id]);
        let response = self.request(Method::GET, url).send().await?;

        self.handle_response(response, &format!("style {}", style_id))
            .await
    }

    /// Delete a style; `false` when it was already gone
    pub async fn delete_style(&self, style_id: &str) -> Result<bool> {
        let style_id = require_id(style_id, "style")?;
        let url = self.endpoint(["v1", "styles", style_id]);
        let response = self.request(Method::DELETE, url).send().await?;

        self.handle_delete_response(response, &format!("style {}", style_id))
            .await
    }
}
