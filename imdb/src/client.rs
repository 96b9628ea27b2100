//! A client for querying a JSON proxy of IMDb title data.
//!
//! This module provides a high-level async interface for searching titles and fetching full
//! title records, decoded into the structured types from [`crate::types`].

use std::time::Duration;

use reqwest::{ClientBuilder, Url, redirect::Policy};

use crate::{Error, Title};

/// The base URL of the title-data service.
const BASE_URL: &str = "https://movie-db.appspot.com";
/// The relative path of the search endpoint.
const FIND_PATH: &str = "/find";
/// The name of the query parameter used to specify the search query.
const FIND_QUERY_PARAM: &str = "q";
/// The path segment of the title details endpoint.
const TITLE_PATH: &str = "title";

/// An asynchronous client for the IMDb title-data service.
///
/// This client handles the construction of HTTP requests, sending them to the service, and
/// decoding the JSON responses.
#[derive(Debug)]
pub struct Client {
    /// The base URL of the service endpoint.
    base_url: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// This method provides a convenient way to create a client. It configures a 30-second
    /// timeout and disables redirects.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. This can happen in environments
    /// with misconfigured network or TLS dependencies. For a non-panicking version, see
    /// [`Client::try_new`].
    #[must_use]
    pub fn new() -> Client {
        Client::try_new().expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// This is the fallible version of [`Client::new`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error::BuildClient`] if the underlying `reqwest` client fails to build. See
    /// [`ClientBuilder::build`] for more details on potential failures.
    pub fn try_new() -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Self::with_client(client))
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple services or require
    /// custom configuration (e.g., proxies, custom headers).
    ///
    /// # Arguments
    ///
    /// * `client` - An existing `reqwest::Client` instance.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Client {
        let base_url = String::from(BASE_URL);

        Client { base_url, client }
    }

    /// Searches for titles matching the given query.
    ///
    /// The returned records are partial: typically only the id, name and year are populated.
    /// Use [`Client::title`] with a result's id to fetch the full record. The list may be
    /// empty when nothing matches.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`]: if the HTTP request fails due to network issues, a timeout, or if
    ///   the server returns a non-successful status code.
    /// - [`Error::Deserialize`]: if the response body is not a valid list of titles.
    pub async fn search_title(&self, query: &str) -> Result<Vec<Title>, Error> {
        #[cfg(feature = "log")]
        tracing::debug!(%query, "searching titles");

        let url = format!("{base_url}{FIND_PATH}", base_url = self.base_url);
        let request = self.client.get(url).query(&[(FIND_QUERY_PARAM, query)]);
        let response = request.send().await.map_err(Error::Request)?;

        match response.error_for_status() {
            Ok(response) => response.json().await.map_err(Error::Deserialize),
            Err(err) => Err(Error::Request(err)),
        }
    }

    /// Fetches the full record for the title with the given id.
    ///
    /// # Arguments
    ///
    /// * `id` - The IMDb title id (e.g. "tt0133093"). The id is percent-escaped into a URL
    ///   path segment.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`]: if the HTTP request fails due to network issues, a timeout, or if
    ///   the server returns a non-successful status code.
    /// - [`Error::Deserialize`]: if the response body is not a valid title record.
    pub async fn title(&self, id: &str) -> Result<Title, Error> {
        #[cfg(feature = "log")]
        tracing::debug!(%id, "fetching title");

        let mut url = Url::parse(&self.base_url).expect("service base url");
        url.path_segments_mut()
            .expect("service base url is a valid base")
            .push(TITLE_PATH)
            .push(id);

        let request = self.client.get(url);
        let response = request.send().await.map_err(Error::Request)?;

        match response.error_for_status() {
            Ok(response) => response.json().await.map_err(Error::Deserialize),
            Err(err) => Err(Error::Request(err)),
        }
    }
}

impl Default for Client {
    /// Creates a default `Client` instance.
    ///
    /// This is equivalent to calling [`Client::new`].
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_client() {
        let http_client = reqwest::Client::new();
        let _ = Client::with_client(http_client);
    }
}
