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

//! serve heat risk datasets as JSON over HTTP

use std::sync::Arc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use anyhow::Result;
use albedo_heat::{
    load_config, HeatRiskConfig, HeatRiskService, SourceKind,
    web::{build_router, serve, HeatRiskState, ServerConfig}
};

/// HTTP server for heat risk data
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    /// use the configured ArcGIS feature service instead of NASA POWER
    #[arg(long)]
    arcgis: bool,

    /// name of the heat risk config file
    #[arg(long, default_value="heat_risk.ron")]
    config: String,

    /// name of the server config file
    #[arg(long, default_value="heat_risk_server.ron")]
    server_config: String,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config: HeatRiskConfig = load_config( &args.config)?;
    let server_config: ServerConfig = load_config( &args.server_config)?;

    let kind = if args.arcgis { SourceKind::ArcGis } else { SourceKind::NasaPower };
    let service = HeatRiskService::from_config( &config, kind)?;
    let state = Arc::new( HeatRiskState::new( service, config.power.clone())?);

    let router = build_router( &server_config.name, state);
    Ok( serve( &server_config, router).await? )
}
