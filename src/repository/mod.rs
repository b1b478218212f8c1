pub mod rest;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// Placeholder shown for an asset that exposes no id or name. Search
/// results can be partially populated, so user-facing text substitutes
/// this instead of carrying an optional value around.
pub const MISSING_DISPLAY_VALUE: &str = "null";

/// An asset held in the repository. Fetched read-only from a connection;
/// the client only builds these itself in tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// One-line description
    #[serde(
        rename = "shortDescription",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub short_description: Option<String>,
    /// Kind of asset (feature, sample, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub asset_type: Option<AssetType>,
    /// Product applicability metadata, a `key=value;` delimited string
    #[serde(rename = "appliesTo", skip_serializing_if = "Option::is_none", default)]
    pub applies_to: Option<String>,
}

impl Asset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.short_description = Some(description);
        self
    }

    pub fn with_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    pub fn with_applies_to(mut self, applies_to: String) -> Self {
        self.applies_to = Some(applies_to);
        self
    }

    /// ID for user-facing text, substituting the placeholder when absent.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(MISSING_DISPLAY_VALUE)
    }

    /// Name for user-facing text, substituting the placeholder when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(MISSING_DISPLAY_VALUE)
    }
}

/// Kind of asset, using the repository's wire type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "com.ibm.websphere.Feature")]
    Feature,
    #[serde(rename = "com.ibm.websphere.Ifix")]
    Ifix,
    #[serde(rename = "com.ibm.websphere.AdminScript")]
    AdminScript,
    #[serde(rename = "com.ibm.websphere.Config")]
    Config,
    #[serde(rename = "com.ibm.websphere.Tool")]
    Tool,
    #[serde(rename = "com.ibm.websphere.ProductSample")]
    ProductSample,
    #[serde(rename = "com.ibm.websphere.OpenSource")]
    OpenSource,
    #[serde(rename = "com.ibm.websphere.Addon")]
    Addon,
}

impl AssetType {
    /// Type tag as it appears on the wire.
    pub fn wire_value(&self) -> &'static str {
        match self {
            AssetType::Feature => "com.ibm.websphere.Feature",
            AssetType::Ifix => "com.ibm.websphere.Ifix",
            AssetType::AdminScript => "com.ibm.websphere.AdminScript",
            AssetType::Config => "com.ibm.websphere.Config",
            AssetType::Tool => "com.ibm.websphere.Tool",
            AssetType::ProductSample => "com.ibm.websphere.ProductSample",
            AssetType::OpenSource => "com.ibm.websphere.OpenSource",
            AssetType::Addon => "com.ibm.websphere.Addon",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetType::Feature => "Feature",
            AssetType::Ifix => "iFix",
            AssetType::AdminScript => "Admin Script",
            AssetType::Config => "Config",
            AssetType::Tool => "Tool",
            AssetType::ProductSample => "Product Sample",
            AssetType::OpenSource => "Open Source",
            AssetType::Addon => "Addon",
        };
        write!(f, "{}", name)
    }
}

/// Which audience an asset is visible to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
    Admin,
    Install,
}

/// Restricts a search to assets applicable to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub product_id: String,
    pub version: Option<String>,
    pub edition: Option<String>,
}

impl ProductFilter {
    pub fn new(product_id: String) -> Self {
        Self {
            product_id,
            version: None,
            edition: None,
        }
    }

    /// Renders the filter as a `key=value;` delimited query value.
    pub fn to_query(&self) -> String {
        let mut parts = vec![format!("productId={}", self.product_id)];
        if let Some(ref version) = self.version {
            parts.push(format!("version={}", version));
        }
        if let Some(ref edition) = self.edition {
            parts.push(format!("edition={}", edition));
        }
        parts.join(";")
    }
}

/// Capability handle on one repository. One connection per invocation,
/// used sequentially; implementations never retry after a fatal error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryConnection: Send + Sync {
    /// Fetches a single asset by ID.
    async fn get_asset(&self, id: &str) -> Result<Asset, RepositoryError>;

    /// Searches the repository. Empty filter slices and `None` visibility
    /// leave the corresponding dimension unrestricted.
    async fn find_assets(
        &self,
        query: &str,
        products: &[ProductFilter],
        types: &[AssetType],
        visibility: Option<Visibility>,
    ) -> Result<Vec<Asset>, RepositoryError>;

    /// Fetches every asset in the repository.
    async fn all_assets(&self) -> Result<Vec<Asset>, RepositoryError>;

    /// Deletes an asset previously fetched from this connection.
    async fn delete_asset(&self, asset: &Asset) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_builder() {
        let asset = Asset::new()
            .with_id("1".to_string())
            .with_name("A name".to_string())
            .with_description("A short description".to_string())
            .with_type(AssetType::Feature)
            .with_applies_to("productVersion=8.5.5.4;".to_string());

        assert_eq!(asset.id, Some("1".to_string()));
        assert_eq!(asset.name, Some("A name".to_string()));
        assert_eq!(asset.short_description, Some("A short description".to_string()));
        assert_eq!(asset.asset_type, Some(AssetType::Feature));
        assert_eq!(asset.applies_to, Some("productVersion=8.5.5.4;".to_string()));
    }

    #[test]
    fn test_display_values_default_to_placeholder() {
        let asset = Asset::new();
        assert_eq!(asset.display_id(), "null");
        assert_eq!(asset.display_name(), "null");
    }

    #[test]
    fn test_display_values_present() {
        let asset = Asset::new()
            .with_id("abc".to_string())
            .with_name("My feature".to_string());
        assert_eq!(asset.display_id(), "abc");
        assert_eq!(asset.display_name(), "My feature");
    }

    #[test]
    fn test_asset_type_display() {
        assert_eq!(AssetType::Feature.to_string(), "Feature");
        assert_eq!(AssetType::ProductSample.to_string(), "Product Sample");
        assert_eq!(AssetType::Ifix.to_string(), "iFix");
    }

    #[test]
    fn test_asset_deserializes_from_wire_format() {
        let json = r#"{
            "_id": "1234",
            "name": "A name",
            "shortDescription": "A short description",
            "type": "com.ibm.websphere.Feature",
            "appliesTo": "productVersion=8.5.5.4;"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.id, Some("1234".to_string()));
        assert_eq!(asset.asset_type, Some(AssetType::Feature));
        assert_eq!(asset.applies_to, Some("productVersion=8.5.5.4;".to_string()));
    }

    #[test]
    fn test_asset_deserializes_with_missing_fields() {
        let asset: Asset = serde_json::from_str("{}").unwrap();
        assert_eq!(asset, Asset::new());
    }

    #[test]
    fn test_product_filter_query() {
        let mut filter = ProductFilter::new("com.ibm.websphere.appserver".to_string());
        filter.version = Some("8.5.5.4".to_string());
        assert_eq!(
            filter.to_query(),
            "productId=com.ibm.websphere.appserver;version=8.5.5.4"
        );
    }
}
