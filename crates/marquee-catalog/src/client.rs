//! Catalog API client

use async_trait::async_trait;
use url::Url;

use marquee_auth::{endpoint, read_error_message, SessionManager};

use crate::error::CatalogError;
use crate::movie::Movie;
use crate::Result;

/// Batch operations on the remote movie catalog.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn batch_add(&self, movies: &[Movie]) -> Result<()>;

    async fn batch_delete(&self, movie_ids: &[i64]) -> Result<()>;
}

pub struct HttpMovieCatalog {
    client: reqwest::Client,
    batch_url: Url,
    session: SessionManager,
}

impl HttpMovieCatalog {
    pub fn new(client: reqwest::Client, api_url: &Url, session: SessionManager) -> Result<Self> {
        Ok(Self {
            client,
            batch_url: endpoint(api_url, "api/movies/batch")?,
            session,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let request = match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = read_error_message(response).await;
            return Err(CatalogError::Api { status, message });
        }

        Ok(())
    }
}

#[async_trait]
impl MovieCatalog for HttpMovieCatalog {
    async fn batch_add(&self, movies: &[Movie]) -> Result<()> {
        self.send(self.client.post(self.batch_url.clone()).json(movies))
            .await
    }

    async fn batch_delete(&self, movie_ids: &[i64]) -> Result<()> {
        self.send(self.client.delete(self.batch_url.clone()).json(movie_ids))
            .await
    }
}
