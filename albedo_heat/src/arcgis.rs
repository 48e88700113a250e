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

//! alternate reference temperature source: a (paged) ArcGIS feature service query
//!
//! ```text
//! GET <query_url>?where=1=1&outFields=*&resultRecordCount=<n>&f=json
//! ```
//!
//! Attribute names for the temperature differ between deployments so we probe a configured
//! list of field names per feature and use a default value if none of them is present.
//! The reference temperature is the mean of all valid feature temperatures.

use std::time::Duration;
use serde::{Serialize,Deserialize};
use serde_json::{Map, Value};
use reqwest::Client;
use async_trait::async_trait;
use tracing::{info,warn};
use url::Url;
use albedo_common::{
    MinMaxAvg, round1,
    datetime::secs,
    net::{build_client, get_json, query_url}
};

use crate::{ReferenceTemperature, ReferenceTemperatureSource, ValidationRules, FALLBACK_TEMP};
use crate::errors::{Result, op_failed};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FeatureServiceConfig {
    /// the layer query endpoint (`.../FeatureServer/<layer>/query`)
    pub query_url: String,

    /// page size of the query
    pub result_record_count: u32,

    /// attribute names to probe for a temperature value, in order
    pub temperature_fields: Vec<String>,

    /// value used for features that have none of the `temperature_fields`
    pub default_temperature: f64,

    pub timeout: Duration,
}

impl FeatureServiceConfig {
    pub fn new (query_url: impl ToString)->Self {
        FeatureServiceConfig {
            query_url: query_url.to_string(),
            result_record_count: 100,
            temperature_fields: ["LST", "lst_celsius", "temperatura", "temperature", "temp"].iter().map(|s| s.to_string()).collect(),
            default_temperature: FALLBACK_TEMP,
            timeout: secs(10),
        }
    }
}

#[derive(Debug,Deserialize)]
pub struct FeatureQueryResponse {
    #[serde(default)]
    pub features: Vec<Feature>,

    /// feature services report query errors with a 200 status and an error object
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug,Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: Map<String,Value>,
}

pub fn feature_query_url (config: &FeatureServiceConfig)->Result<Url> {
    let record_count = config.result_record_count.to_string();

    Ok( query_url( &config.query_url, &[
        ("where", "1=1"),
        ("outFields", "*"),
        ("resultRecordCount", record_count.as_str()),
        ("f", "json"),
    ])?)
}

/// numbers, or strings that parse as numbers (decimal comma accepted)
fn numeric_value (v: &Value)->Option<f64> {
    let x = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None
    };
    x.filter( |x| x.is_finite())
}

/// the value of the first of `fields` that is present and numeric, `default` if none is
pub fn probe_temperature (attributes: &Map<String,Value>, fields: &[String], default: f64)->f64 {
    fields.iter()
        .find_map( |f| attributes.get( f.as_str()).and_then( numeric_value))
        .unwrap_or( default)
}

pub fn feature_temperatures (response: &FeatureQueryResponse, config: &FeatureServiceConfig)->Vec<f64> {
    response.features.iter()
        .map( |f| probe_temperature( &f.attributes, &config.temperature_fields, config.default_temperature))
        .collect()
}

/// rounded mean of the valid values, None if there are none
pub fn mean_valid_temperature (temperatures: &[f64], rules: &ValidationRules)->Option<f64> {
    let acc: MinMaxAvg = temperatures.iter().copied().filter( |t| rules.is_valid_temperature(*t)).collect();
    if acc.is_empty() { None } else { Some( round1( acc.avg)) }
}

pub async fn try_fetch_feature_reference (client: &Client, config: &FeatureServiceConfig, rules: &ValidationRules)->Result<f64> {
    let url = feature_query_url( config)?;
    let response: FeatureQueryResponse = get_json( client, url).await?;

    if let Some(error) = &response.error {
        return Err( op_failed!("feature service error: {}", error))
    }

    let temperatures = feature_temperatures( &response, config);
    mean_valid_temperature( &temperatures, rules)
        .ok_or_else( || op_failed!("no valid temperature in {} features", temperatures.len()))
}

pub struct ArcGisSource {
    client: Client,
    config: FeatureServiceConfig,
}

impl ArcGisSource {
    pub const NAME: &'static str = "arcgis";

    pub fn new (config: FeatureServiceConfig)->Result<Self> {
        let client = build_client( config.timeout)?;
        Ok( ArcGisSource { client, config } )
    }

    pub fn with_client (client: Client, config: FeatureServiceConfig)->Self {
        ArcGisSource { client, config }
    }
}

#[async_trait]
impl ReferenceTemperatureSource for ArcGisSource {
    fn name (&self)->&str { Self::NAME }

    async fn reference_temperature (&self, rules: &ValidationRules)->ReferenceTemperature {
        match try_fetch_feature_reference( &self.client, &self.config, rules).await {
            Ok(value) => {
                info!("feature service reference temperature {value}°C");
                ReferenceTemperature::live( value, Self::NAME)
            }
            Err(e) => {
                warn!("feature service reference temperature not available ({e}), using fallback {}", rules.fallback_temp);
                ReferenceTemperature::fallback( rules, Self::NAME)
            }
        }
    }
}
