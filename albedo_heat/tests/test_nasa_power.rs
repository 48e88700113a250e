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

use std::{collections::HashMap, net::SocketAddr, time::Duration};
use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use albedo_common::net::build_client;
use albedo_heat::{
    AlbedoHeatError, DataQuality, ReferenceTemperatureSource, ValidationRules, FALLBACK_TEMP,
    nasa_power::{
        daily_query_url, default_climatology_year, fetch_monthly_climatology, monthly_climatology, monthly_query_url,
        try_fetch_reference_temperature, NasaPowerSource, PowerConfig, PowerResponse
    }
};

/// tests NASA POWER retrieval against a local server that mimics the point API
/// run with "cargo test -p albedo_heat --test test_nasa_power -- --nocapture"

async fn serve (router: Router)->SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move { axum::serve( listener, router).await.unwrap() });
    addr
}

/// a daily response that has a value for the requested date
fn daily_response (params: &HashMap<String,String>, value: f64)->Json<Value> {
    let date = params.get("start").cloned().unwrap_or_default();
    let param = params.get("parameters").cloned().unwrap_or_default();
    Json( json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [-56.0967, -15.5961, 176.2] },
        "properties": { "parameter": { param: { date: value } } }
    }))
}

fn monthly_json (year: i32)->Value {
    let mut avg = serde_json::Map::new();
    let mut max = serde_json::Map::new();
    for m in 1..=12 {
        avg.insert( format!("{year}{m:02}"), json!( 25.0 + m as f64 * 0.51));
        max.insert( format!("{year}{m:02}"), json!( 31.0 + m as f64 * 0.77));
    }
    avg.insert( format!("{year}13"), json!(28.3)); // annual
    max.insert( format!("{year}13"), json!(36.1));

    json!({ "properties": { "parameter": { "T2M": avg, "T2M_MAX": max } } })
}

fn power_router ()->Router {
    Router::new()
        .route( "/daily", get( |Query(p): Query<HashMap<String,String>>| async move { daily_response( &p, 38.71) }))
        .route( "/sentinel", get( |Query(p): Query<HashMap<String,String>>| async move { daily_response( &p, -999.0) }))
        .route( "/hot", get( |Query(p): Query<HashMap<String,String>>| async move { daily_response( &p, 95.0) }))
        .route( "/otherday", get( || async { Json( json!({ "properties": { "parameter": { "TS": { "19990101": 38.0 } } } })) }))
        .route( "/broken", get( || async { (StatusCode::INTERNAL_SERVER_ERROR, "POWER is down") }))
        .route( "/monthly", get( |Query(p): Query<HashMap<String,String>>| async move {
            let year: i32 = p.get("start").and_then( |s| s.parse().ok()).unwrap_or(2025);
            Json( monthly_json( year))
        }))
}

fn config_for (addr: &SocketAddr, path: &str)->PowerConfig {
    PowerConfig {
        daily_url: format!("http://{addr}/{path}"),
        monthly_url: format!("http://{addr}/monthly"),
        timeout: Duration::from_secs(2),
        ..PowerConfig::default()
    }
}

fn client ()->reqwest::Client { build_client( Duration::from_secs(2)).unwrap() }

#[test]
fn test_daily_query_url () {
    let config = PowerConfig::default();
    let date = NaiveDate::from_ymd_opt( 2026, 9, 10).unwrap();
    let url = daily_query_url( &config, &date).unwrap();
    println!("{url}");

    let q: HashMap<String,String> = url.query_pairs().map( |(k,v)| (k.to_string(), v.to_string())).collect();
    assert_eq!( url.path(), "/api/temporal/daily/point");
    assert_eq!( q["parameters"], "TS");
    assert_eq!( q["community"], "AG");
    assert_eq!( q["latitude"], "-15.5961");
    assert_eq!( q["longitude"], "-56.0967");
    assert_eq!( q["format"], "JSON");
    assert_eq!( q["start"], "20260910");
    assert_eq!( q["end"], "20260910");
}

#[test]
fn test_monthly_query_url () {
    let url = monthly_query_url( &PowerConfig::default(), -15.6, -56.1, 2025).unwrap();
    let q: HashMap<String,String> = url.query_pairs().map( |(k,v)| (k.to_string(), v.to_string())).collect();
    assert_eq!( q["parameters"], "T2M,T2M_MAX");
    assert_eq!( q["community"], "SB");
    assert_eq!( q["start"], "2025");
    assert_eq!( q["end"], "2025");

    let now = Utc.with_ymd_and_hms( 2026, 1, 3, 0, 0, 0).unwrap();
    assert_eq!( default_climatology_year( &now), 2025);
}

#[tokio::test]
async fn test_live_reference () {
    let addr = serve( power_router()).await;
    let rules = ValidationRules::default();

    // the query date is `lag_days` before now, the response is keyed by that date
    let now = Utc.with_ymd_and_hms( 2026, 9, 14, 12, 0, 0).unwrap();
    let value = try_fetch_reference_temperature( &client(), &config_for( &addr, "daily"), &rules, &now).await.unwrap();
    assert_eq!( value, 38.7);

    let source = NasaPowerSource::with_client( client(), config_for( &addr, "daily"));
    let reference = source.reference_temperature( &rules).await;
    println!("{reference:?}");
    assert_eq!( reference.quality, DataQuality::Live);
    assert_eq!( reference.value, 38.7);
    assert_eq!( reference.source, "nasa-power");
}

#[tokio::test]
async fn test_fallback_reference () {
    let addr = serve( power_router()).await;
    let rules = ValidationRules::default();
    let now = Utc.with_ymd_and_hms( 2026, 9, 14, 12, 0, 0).unwrap();

    for path in ["sentinel", "hot", "otherday", "broken", "nowhere"] {
        let res = try_fetch_reference_temperature( &client(), &config_for( &addr, path), &rules, &now).await;
        println!("{path}: {res:?}");
        assert!( res.is_err());

        let reference = NasaPowerSource::with_client( client(), config_for( &addr, path)).reference_temperature( &rules).await;
        assert_eq!( reference.quality, DataQuality::Fallback);
        assert_eq!( reference.value, FALLBACK_TEMP);
    }

    let res = try_fetch_reference_temperature( &client(), &config_for( &addr, "sentinel"), &rules, &now).await;
    assert!( matches!( res, Err(AlbedoHeatError::InvalidReadingError(v)) if v == -999.0));
}

#[tokio::test]
async fn test_unreachable_host () {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }; // nobody listens on this port anymore

    let reference = NasaPowerSource::with_client( client(), config_for( &addr, "daily"))
        .reference_temperature( &ValidationRules::default()).await;
    assert!( !reference.is_live());
    assert_eq!( reference.value, FALLBACK_TEMP);
}

#[test]
fn test_monthly_climatology () {
    let response: PowerResponse = serde_json::from_value( monthly_json( 2025)).unwrap();
    let months = monthly_climatology( &response).unwrap();
    for m in &months { println!("{m:?}") }

    assert_eq!( months.len(), 12); // no annual entry
    assert_eq!( months[0].month, "Jan");
    assert_eq!( months[11].month, "Dez");
    assert_eq!( months[0].avg_temp, 25.5);
    assert_eq!( months[0].max_temp, 31.8);

    let response: PowerResponse = serde_json::from_value( json!({ "properties": { "parameter": { "T2M": { "202501": 25.0 } } } })).unwrap();
    assert!( monthly_climatology( &response).is_err());
}

#[tokio::test]
async fn test_fetch_monthly_climatology () {
    let addr = serve( power_router()).await;
    let config = config_for( &addr, "daily");

    let months = fetch_monthly_climatology( &client(), &config, config.latitude, config.longitude, 2024).await.unwrap();
    assert_eq!( months.len(), 12);
    assert_eq!( months[8].month, "Set");

    let config = PowerConfig { monthly_url: format!("http://{addr}/broken"), ..config };
    assert!( fetch_monthly_climatology( &client(), &config, -15.6, -56.1, 2024).await.is_err());
}
