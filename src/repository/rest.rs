use async_trait::async_trait;
use reqwest::{Response, Url};
use tracing::debug;

use crate::error::RepositoryError;

use super::{Asset, AssetType, ProductFilter, RepositoryConnection, Visibility};

/// Connection to a repository over its REST interface.
pub struct RestConnection {
    base: String,
    client: reqwest::Client,
}

impl RestConnection {
    pub fn new(base: Url) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("assetctl/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();

        Self {
            base: base.as_str().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn assets_url(&self) -> String {
        format!("{}/ma/v1/assets", self.base)
    }

    fn asset_url(&self, id: &str) -> String {
        format!("{}/ma/v1/assets/{}", self.base, id)
    }
}

fn transport_error(err: reqwest::Error) -> RepositoryError {
    if err.is_decode() {
        RepositoryError::BadData(err.to_string())
    } else {
        RepositoryError::Connection(err.to_string())
    }
}

/// Turns a non-success response into a request failure carrying the
/// status code and whatever the server put in the body.
async fn check_status(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RepositoryError::RequestFailure {
        status: status.as_u16(),
        message,
    })
}

fn visibility_param(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "PUBLIC",
        Visibility::Private => "PRIVATE",
        Visibility::Admin => "ADMIN",
        Visibility::Install => "INSTALL",
    }
}

#[async_trait]
impl RepositoryConnection for RestConnection {
    async fn get_asset(&self, id: &str) -> Result<Asset, RepositoryError> {
        debug!("GET asset {}", id);
        let response = self
            .client
            .get(self.asset_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        response.json::<Asset>().await.map_err(transport_error)
    }

    async fn find_assets(
        &self,
        query: &str,
        products: &[ProductFilter],
        types: &[AssetType],
        visibility: Option<Visibility>,
    ) -> Result<Vec<Asset>, RepositoryError> {
        debug!("searching assets for {:?}", query);
        let mut params: Vec<(&str, String)> = vec![("q", query.to_string())];
        for product in products {
            params.push(("product", product.to_query()));
        }
        for asset_type in types {
            params.push(("type", asset_type.wire_value().to_string()));
        }
        if let Some(visibility) = visibility {
            params.push(("visibility", visibility_param(visibility).to_string()));
        }

        let response = self
            .client
            .get(self.assets_url())
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        response.json::<Vec<Asset>>().await.map_err(transport_error)
    }

    async fn all_assets(&self) -> Result<Vec<Asset>, RepositoryError> {
        debug!("fetching all assets");
        let response = self
            .client
            .get(self.assets_url())
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        response.json::<Vec<Asset>>().await.map_err(transport_error)
    }

    async fn delete_asset(&self, asset: &Asset) -> Result<(), RepositoryError> {
        let id = asset.id.as_deref().ok_or_else(|| {
            RepositoryError::DeletionFailed("asset has no ID to delete by".to_string())
        })?;
        debug!("DELETE asset {}", id);
        let response = self
            .client
            .delete(self.asset_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(RepositoryError::DeletionFailed(format!(
            "deletion failed with status {}: {}",
            status.as_u16(),
            message
        )))
    }
}
