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

use std::time::Duration;
use serde::Deserialize;
use chrono::{NaiveDate, TimeZone, Utc};
use albedo_common::{
    round1, round_half_up, MinMaxAvg,
    config::{load_config_path, ConfigError},
    datetime::{lagged_date, yyyymmdd}
};

/// run with "cargo test -p albedo_common --test test_common -- --nocapture"

#[test]
fn test_round_half_up () {
    assert_eq!( round1( 2.25), 2.3);
    assert_eq!( round1( -2.25), -2.2); // ties go towards positive infinity
    assert_eq!( round1( -0.05), 0.0);
    assert_eq!( round1( 35.04999), 35.0);
    assert_eq!( round1( 39.2 - 4.2), 35.0);
    assert_eq!( round_half_up( 72.5, 0), 73.0);
    assert_eq!( round_half_up( 0.125, 2), 0.13);
}

#[test]
fn test_min_max_avg () {
    let empty = MinMaxAvg::new();
    assert!( empty.is_empty());

    let acc: MinMaxAvg = [40.0, 36.0, 44.0].into_iter().collect();
    println!("{acc:?}");
    assert_eq!( acc.n, 3);
    assert_eq!( acc.min, 36.0);
    assert_eq!( acc.max, 44.0);
    assert!( (acc.avg - 40.0).abs() < 1e-9);
}

#[test]
fn test_lagged_date () {
    let now = Utc.with_ymd_and_hms( 2026, 3, 2, 1, 30, 0).unwrap();
    let date = lagged_date( &now, 4);
    assert_eq!( date, NaiveDate::from_ymd_opt( 2026, 2, 26).unwrap());
    assert_eq!( yyyymmdd( &date), "20260226");
}

#[derive(Debug,Deserialize,PartialEq)]
struct TestConfig {
    name: String,
    timeout: Duration,
    limits: (f64,f64),
}

#[test]
fn test_load_config_path () {
    let path = std::env::temp_dir().join( format!("albedo_test_config_{}.ron", std::process::id()));
    std::fs::write( &path, r#"
        // a comment
        TestConfig( name: "test", timeout: (secs: 10, nanos: 0), limits: (15.0, 68.0) )
    "#).unwrap();

    let config: TestConfig = load_config_path( &path).unwrap();
    std::fs::remove_file( &path).unwrap();

    assert_eq!( config, TestConfig { name: "test".to_string(), timeout: Duration::from_secs(10), limits: (15.0, 68.0) });
}

#[test]
fn test_load_config_errors () {
    let res: Result<TestConfig,ConfigError> = load_config_path( "/does/not/exist.ron");
    assert!( res.is_err());

    let path = std::env::temp_dir().join( format!("albedo_test_bad_config_{}.ron", std::process::id()));
    std::fs::write( &path, "TestConfig( name: 42 )").unwrap();
    let res: Result<TestConfig,ConfigError> = load_config_path( &path);
    std::fs::remove_file( &path).unwrap();

    match res {
        Err(ConfigError::RonError(e)) => println!("got expected RON error: {e}"),
        other => panic!("expected RonError, got {other:?}")
    }
}
