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

//! retrieve and print NASA POWER monthly climatology for a location

use clap::Parser;
use tracing_subscriber::EnvFilter;
use anyhow::Result;
use albedo_common::{datetime::utc_now, net::build_client};
use albedo_heat::{
    load_config, HeatRiskConfig,
    nasa_power::{default_climatology_year, fetch_monthly_climatology}
};

/// get monthly average and max 2m air temperatures of one year
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    /// latitude in degrees (default is the configured reference point)
    #[arg(long, allow_hyphen_values=true)]
    lat: Option<f64>,

    /// longitude in degrees (default is the configured reference point)
    #[arg(long, allow_hyphen_values=true)]
    lon: Option<f64>,

    /// year (default is last year)
    #[arg(long)]
    year: Option<i32>,

    /// name of the heat risk config file
    #[arg(long, default_value="heat_risk.ron")]
    config: String,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config: HeatRiskConfig = load_config( &args.config)?;
    let power = &config.power;

    let lat = args.lat.unwrap_or( power.latitude);
    let lon = args.lon.unwrap_or( power.longitude);
    let year = args.year.unwrap_or_else( || default_climatology_year( &utc_now()));

    let client = build_client( power.timeout)?;
    let months = fetch_monthly_climatology( &client, power, lat, lon, year).await?;

    println!("monthly climatology {year} for {lat},{lon}:");
    for m in &months {
        println!("  {}  avg {:>5.1}°C  max {:>5.1}°C", m.month, m.avg_temp, m.max_temp);
    }

    Ok(())
}
