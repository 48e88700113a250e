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
#![allow(unused)]

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use serde_json::Value;
use albedo_heat::{
    create_source, AlbedoHeatError, DataQuality, FixedSource, GeoScale, HeatRiskConfig, HeatRiskService, RegionTable, RiskLevel,
    SourceKind, ValidationRules, FALLBACK_TEMP,
    nasa_power::PowerConfig,
    web::{build_router, HeatRiskState}
};

/// tests complete enrichment cycles and the HTTP interface
/// run with "cargo test -p albedo_heat --test test_service -- --nocapture"

fn fixed_service (value: f64)->HeatRiskService {
    HeatRiskService::new( Arc::new( RegionTable::cuiaba()), ValidationRules::default(), Box::new( FixedSource::new( value))).unwrap()
}

#[tokio::test]
async fn test_fixed_cycle () {
    let service = fixed_service( 39.2);
    assert_eq!( service.source_name(), "fixed");

    let dataset = service.refresh().await;
    assert_eq!( dataset.table, "cuiaba");
    assert_eq!( dataset.data_quality(), DataQuality::Live);
    assert_eq!( dataset.regions.len(), 12);

    let centro = dataset.get("centro").unwrap();
    assert_eq!( centro.temperature, 44.4);
    assert_eq!( centro.risk_level, RiskLevel::Critical);
    assert_eq!( centro.vegetation_coverage, 4);

    let ufmt = dataset.get("ufmt").unwrap();
    assert_eq!( ufmt.temperature, 35.0);
    assert_eq!( ufmt.risk_level, RiskLevel::Medium);
    assert_eq!( ufmt.vegetation_coverage, 78);

    assert_eq!( dataset.visible_at( GeoScale::Cuiaba).count(), 10);
    assert_eq!( dataset.visible_at( GeoScale::Baixada).count(), 12);
    assert_eq!( dataset.visible_at( GeoScale::MatoGrosso).count(), 12);
    assert!( dataset.visible_at( GeoScale::Cuiaba).all( |r| r.id != "chapada"));
}

#[tokio::test]
async fn test_out_of_range_fixed_source () {
    let dataset = fixed_service( 120.0).refresh().await;
    assert_eq!( dataset.data_quality(), DataQuality::Fallback);
    assert_eq!( dataset.reference.value, FALLBACK_TEMP);
    assert_eq!( dataset.get("centro").unwrap().temperature, 44.4);
}

#[test]
fn test_rejects_inconsistent_rules () {
    let rules = ValidationRules { fallback_temp: 99.0, ..ValidationRules::default() };
    let res = HeatRiskService::new( Arc::new( RegionTable::cuiaba()), rules, Box::new( FixedSource::new( 120.0)));
    assert!( matches!( res, Err(AlbedoHeatError::InvalidConfigError(_))));

    let rules = ValidationRules { ndvi_min: 80, ndvi_max: 20, ..ValidationRules::default() };
    assert!( HeatRiskService::new( Arc::new( RegionTable::cuiaba()), rules, Box::new( FixedSource::new( 39.2))).is_err());
}

#[tokio::test]
async fn test_summary () {
    let dataset = fixed_service( 39.2).refresh().await;
    let summary = dataset.summary();
    println!("{}", serde_json::to_string_pretty( &summary).unwrap());

    // 39.2 + offsets: centro 44.4, cpa 42.3, porto 44.0, coxipo 41.6, ufmt 35.0, bosque 43.0,
    // tijucal 41.3, parquecuiaba 40.7, vg_centro 42.4, vg_cristorei 42.0, chapada 31.7, leverger 38.0
    assert_eq!( summary.n_regions, 12);
    assert_eq!( summary.count( RiskLevel::Critical), 8);
    assert_eq!( summary.count( RiskLevel::High), 2);
    assert_eq!( summary.count( RiskLevel::Medium), 2);
    assert_eq!( summary.count( RiskLevel::Low), 0);
    assert_eq!( summary.min_temp, Some(31.7));
    assert_eq!( summary.max_temp, Some(44.4));
    assert_eq!( summary.hottest.as_deref(), Some("centro"));
    assert_eq!( summary.population_at_risk, 12000 + 110000 + 15000 + 98000 + 14000 + 45000 + 22000 + 85000 + 60000 + 19000);
    assert_eq!( summary.data_quality, DataQuality::Live);

    let json = serde_json::to_value( &summary).unwrap();
    assert_eq!( json["riskCounts"]["Crítico"], 8);
    assert_eq!( json["riskCounts"]["Baixo"], 0);
    assert_eq!( json["dataQuality"], "live");
}

#[test]
fn test_config () {
    let path = concat!( env!("CARGO_MANIFEST_DIR"), "/configs/heat_risk.ron");
    let config: HeatRiskConfig = albedo_common::config::load_config_path( path).unwrap();
    assert!( config.validate().is_ok());
    assert_eq!( config.region_table, "cuiaba.ron");
    assert_eq!( config.rules, ValidationRules::default());
    assert_eq!( config.power.timeout, Duration::from_secs(10));
    assert!( config.feature_service.is_none());

    // no feature service configured
    assert!( create_source( &config, SourceKind::ArcGis).is_err());
    assert_eq!( create_source( &config, SourceKind::Fixed(38.0)).unwrap().name(), "fixed");

    let bad = HeatRiskConfig { rules: ValidationRules { temp_min: 70.0, ..ValidationRules::default() }, ..HeatRiskConfig::default() };
    assert!( bad.validate().is_err());

    let bad = HeatRiskConfig { rules: ValidationRules { fallback_temp: 80.0, ..ValidationRules::default() }, ..HeatRiskConfig::default() };
    assert!( bad.validate().is_err());
}

async fn serve_router (router: axum::Router)->SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move { axum::serve( listener, router).await.unwrap() });
    addr
}

#[tokio::test]
async fn test_router () {
    // climatology requests go to a port nobody listens on
    let dead_addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let power = PowerConfig { monthly_url: format!("http://{dead_addr}/monthly"), timeout: Duration::from_secs(2), ..PowerConfig::default() };

    let state = Arc::new( HeatRiskState::new( fixed_service( 39.2), power).unwrap());
    let addr = serve_router( build_router( "albedo", state)).await;
    let client = reqwest::Client::new();

    let response = client.get( format!("http://{addr}/albedo/heat-risk")).send().await.unwrap();
    assert!( response.status().is_success());
    let dataset: Value = response.json().await.unwrap();
    assert_eq!( dataset["table"], "cuiaba");
    assert_eq!( dataset["reference"]["quality"], "live");
    assert_eq!( dataset["regions"].as_array().unwrap().len(), 12);
    assert_eq!( dataset["regions"][0]["id"], "centro");
    assert_eq!( dataset["regions"][0]["riskLevel"], "Crítico");
    assert!( dataset["generated"].as_str().unwrap().ends_with('Z'));

    let summary: Value = client.get( format!("http://{addr}/albedo/heat-risk/summary")).send().await.unwrap().json().await.unwrap();
    assert_eq!( summary["nRegions"], 12);
    assert_eq!( summary["hottest"], "centro");

    let response = client.get( format!("http://{addr}/albedo/climatology?year=2025")).send().await.unwrap();
    assert_eq!( response.status().as_u16(), 502);
}
