/*
 * Copyright © 2026, AlbedoMaps contributors. All rights reserved.
 *
 * The “AlbedoMaps” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! common utility functions for network operations

use std::{borrow::Borrow, time::Duration};
use reqwest::{Client, StatusCode, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::define_error;

define_error!{ pub AlbedoNetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    UrlError(#[from] url::ParseError) : "invalid url: {0}",
    NotFoundError(String) : "not found {0}",
    StatusError(u16) : "response status {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, AlbedoNetError>;

/// create a client that applies the given timeout to each request (connect through body retrieval)
pub fn build_client (timeout: Duration)->Result<Client> {
    Ok( Client::builder().timeout(timeout).build()? )
}

/// build a full query URL from a base URL and (unencoded) key/value pairs
pub fn query_url<I,K,V> (base_url: &str, params: I)->Result<Url>
    where I: IntoIterator, I::Item: Borrow<(K,V)>, K: AsRef<str>, V: AsRef<str>
{
    Ok( Url::parse_with_params( base_url, params)? )
}

/// GET the given URL and deserialize the JSON response body.
/// Any non-success status is returned as an error, 404 separately as `NotFoundError`
pub async fn get_json<T> (client: &Client, url: Url)->Result<T> where T: DeserializeOwned {
    debug!("GET {url}");
    let response = client.get( url.clone()).send().await?;

    match response.status() {
        status if status.is_success() => from_json( response).await,
        StatusCode::NOT_FOUND => Err( AlbedoNetError::NotFoundError( url.to_string())),
        other => Err( AlbedoNetError::StatusError( other.as_u16()))
    }
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| AlbedoNetError::ParseError(e.to_string()))
}
