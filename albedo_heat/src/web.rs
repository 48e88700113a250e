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

//! JSON over HTTP access to heat risk datasets for presentation clients
//!
//! ```text
//! GET /<name>/heat-risk                    -> HeatRiskDataset (fresh cycle per request)
//! GET /<name>/heat-risk/summary            -> DatasetSummary
//! GET /<name>/climatology?lat=&lon=&year=  -> [MonthlyClimate] (502 if POWER is not available)
//! ```

use std::{net::SocketAddr, sync::Arc};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router
};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tokio::net::TcpListener;
use tracing::{info,warn};
use albedo_common::{datetime::utc_now, net::build_client};

use crate::{
    HeatRiskService, HeatRiskDataset, DatasetSummary,
    nasa_power::{PowerConfig, default_climatology_year, fetch_monthly_climatology},
    errors::Result
};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ServerConfig {
    pub sock_addr: SocketAddr,
    /// path prefix of all routes
    pub name: String,
}

impl ServerConfig {
    pub fn url (&self)->String {
        format!("http://{}/{}", self.sock_addr, self.name)
    }
}

impl Default for ServerConfig {
    fn default()->Self {
        ServerConfig { sock_addr: SocketAddr::from(([127,0,0,1], 9090)), name: "albedo".to_string() }
    }
}

pub struct HeatRiskState {
    service: HeatRiskService,
    client: Client,
    power: PowerConfig,
}

impl HeatRiskState {
    pub fn new (service: HeatRiskService, power: PowerConfig)->Result<Self> {
        let client = build_client( power.timeout)?;
        Ok( HeatRiskState { service, client, power } )
    }
}

pub fn build_router (name: &str, state: Arc<HeatRiskState>)->Router {
    Router::new()
        .route( &format!("/{name}/heat-risk"), get( heat_risk_handler))
        .route( &format!("/{name}/heat-risk/summary"), get( summary_handler))
        .route( &format!("/{name}/climatology"), get( climatology_handler))
        .with_state( state)
}

/// run the server until it fails
pub async fn serve (config: &ServerConfig, router: Router)->Result<()> {
    let listener = TcpListener::bind( config.sock_addr).await?;
    info!("serving heat risk data on {}", config.url());
    axum::serve( listener, router).await?;
    Ok(())
}

async fn heat_risk_handler (State(state): State<Arc<HeatRiskState>>)->Json<HeatRiskDataset> {
    Json( state.service.refresh().await)
}

async fn summary_handler (State(state): State<Arc<HeatRiskState>>)->Json<DatasetSummary> {
    Json( state.service.refresh().await.summary())
}

#[derive(Debug,Deserialize)]
struct ClimatologyQuery {
    lat: Option<f64>,
    lon: Option<f64>,
    year: Option<i32>,
}

async fn climatology_handler (State(state): State<Arc<HeatRiskState>>, Query(q): Query<ClimatologyQuery>)->Response {
    let lat = q.lat.unwrap_or( state.power.latitude);
    let lon = q.lon.unwrap_or( state.power.longitude);
    let year = q.year.unwrap_or_else( || default_climatology_year( &utc_now()));

    match fetch_monthly_climatology( &state.client, &state.power, lat, lon, year).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => {
            warn!("climatology for {lat},{lon} ({year}) not available: {e}");
            (StatusCode::BAD_GATEWAY, format!("climatology not available: {e}")).into_response()
        }
    }
}
