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

//! reference temperature and monthly climatology retrieval from the NASA POWER point API
//! (see https://power.larc.nasa.gov/docs/services/api/temporal/)
//!
//! The daily query asks for a single day `lag_days` in the past since POWER data is published
//! with a delay of several days. Responses look like
//! ```json
//! { "properties": { "parameter": { "TS": { "20260910": 38.71 } } }, ... }
//! ```

use std::{collections::{BTreeMap,HashMap}, time::Duration};
use serde::{Serialize,Deserialize};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use reqwest::Client;
use async_trait::async_trait;
use tracing::{info,warn};
use url::Url;
use albedo_common::{
    round1,
    datetime::{lagged_date, secs, utc_now, yyyymmdd},
    net::{build_client, get_json, query_url}
};

use crate::{ReferenceTemperature, ReferenceTemperatureSource, ValidationRules};
use crate::errors::{AlbedoHeatError, Result, parse_error};

pub const MONTH_NAMES: [&'static str;12] = ["Jan","Fev","Mar","Abr","Mai","Jun","Jul","Ago","Set","Out","Nov","Dez"];

const AVG_TEMP_PARAM: &'static str = "T2M";
const MAX_TEMP_PARAM: &'static str = "T2M_MAX";

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct PowerConfig {
    /// daily point endpoint, e.g. https://power.larc.nasa.gov/api/temporal/daily/point
    pub daily_url: String,

    /// monthly point endpoint, e.g. https://power.larc.nasa.gov/api/temporal/monthly/point
    pub monthly_url: String,

    /// surface temperature parameter of the daily query ("TS" is earth skin temperature)
    pub parameter: String,

    /// POWER user community of the daily query ("AG" agroclimatology)
    pub community: String,

    /// POWER user community of the monthly climatology query ("SB" sustainable buildings)
    pub climatology_community: String,

    /// reference point (downtown Cuiabá)
    pub latitude: f64,
    pub longitude: f64,

    /// publication delay of daily data
    pub lag_days: u32,

    /// max duration of a single request
    pub timeout: Duration,
}

impl Default for PowerConfig {
    fn default()->Self {
        PowerConfig {
            daily_url: "https://power.larc.nasa.gov/api/temporal/daily/point".to_string(),
            monthly_url: "https://power.larc.nasa.gov/api/temporal/monthly/point".to_string(),
            parameter: "TS".to_string(),
            community: "AG".to_string(),
            climatology_community: "SB".to_string(),
            latitude: -15.5961,
            longitude: -56.0967,
            lag_days: 4,
            timeout: secs(10),
        }
    }
}

/// the part of a POWER point response we care about
#[derive(Debug,Deserialize)]
pub struct PowerResponse {
    pub properties: PowerProperties,
}

#[derive(Debug,Deserialize)]
pub struct PowerProperties {
    /// parameter name -> (date key -> value)
    pub parameter: HashMap<String,BTreeMap<String,f64>>,
}

impl PowerResponse {
    pub fn value (&self, parameter: &str, key: &str)->Option<f64> {
        self.properties.parameter.get( parameter).and_then( |values| values.get( key)).copied()
    }
}

/* #region reference temperature ***********************************************************************************/

pub fn daily_query_url (config: &PowerConfig, date: &NaiveDate)->Result<Url> {
    let date = yyyymmdd( date);
    let longitude = config.longitude.to_string();
    let latitude = config.latitude.to_string();

    Ok( query_url( &config.daily_url, &[
        ("parameters", config.parameter.as_str()),
        ("community", config.community.as_str()),
        ("longitude", longitude.as_str()),
        ("latitude", latitude.as_str()),
        ("format", "JSON"),
        ("start", date.as_str()),
        ("end", date.as_str()),
    ])?)
}

/// the validated and rounded daily value from a parsed response
pub fn reference_value (response: &PowerResponse, config: &PowerConfig, date: &NaiveDate, rules: &ValidationRules)->Result<f64> {
    let key = yyyymmdd( date);
    let value = response.value( &config.parameter, &key)
        .ok_or_else( || parse_error!("no {} value for {}", config.parameter, key))?;

    if rules.is_valid_temperature( value) {
        Ok( round1(value) )
    } else {
        Err( AlbedoHeatError::InvalidReadingError(value) )
    }
}

/// fallible version of [`fetch_reference_temperature`] that exposes what went wrong.
/// `now` determines the query date
pub async fn try_fetch_reference_temperature (client: &Client, config: &PowerConfig, rules: &ValidationRules, now: &DateTime<Utc>)->Result<f64> {
    let date = lagged_date( now, config.lag_days);
    let url = daily_query_url( config, &date)?;
    let response: PowerResponse = get_json( client, url).await?;

    reference_value( &response, config, &date, rules)
}

/// this never fails - any network, status, format or validation problem is logged and
/// results in the fallback constant of the provided rules
pub async fn fetch_reference_temperature (client: &Client, config: &PowerConfig, rules: &ValidationRules)->ReferenceTemperature {
    match try_fetch_reference_temperature( client, config, rules, &utc_now()).await {
        Ok(value) => {
            info!("NASA POWER reference temperature {value}°C");
            ReferenceTemperature::live( value, NasaPowerSource::NAME)
        }
        Err(e) => {
            warn!("NASA POWER reference temperature not available ({e}), using fallback {}", rules.fallback_temp);
            ReferenceTemperature::fallback( rules, NasaPowerSource::NAME)
        }
    }
}

pub struct NasaPowerSource {
    client: Client,
    config: PowerConfig,
}

impl NasaPowerSource {
    pub const NAME: &'static str = "nasa-power";

    pub fn new (config: PowerConfig)->Result<Self> {
        let client = build_client( config.timeout)?;
        Ok( NasaPowerSource { client, config } )
    }

    pub fn with_client (client: Client, config: PowerConfig)->Self {
        NasaPowerSource { client, config }
    }

    pub fn config (&self)->&PowerConfig { &self.config }
}

#[async_trait]
impl ReferenceTemperatureSource for NasaPowerSource {
    fn name (&self)->&str { Self::NAME }

    async fn reference_temperature (&self, rules: &ValidationRules)->ReferenceTemperature {
        fetch_reference_temperature( &self.client, &self.config, rules).await
    }
}

/* #endregion reference temperature */

/* #region monthly climatology *************************************************************************************/

/// consolidated monthly 2m air temperature values of one year
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct MonthlyClimate {
    pub month: String,
    pub avg_temp: f64,
    pub max_temp: f64,
}

/// last complete year for a given date
pub fn default_climatology_year (now: &DateTime<Utc>)->i32 {
    now.year() - 1
}

pub fn monthly_query_url (config: &PowerConfig, latitude: f64, longitude: f64, year: i32)->Result<Url> {
    let parameters = format!("{AVG_TEMP_PARAM},{MAX_TEMP_PARAM}");
    let longitude = longitude.to_string();
    let latitude = latitude.to_string();
    let year = year.to_string();

    Ok( query_url( &config.monthly_url, &[
        ("parameters", parameters.as_str()),
        ("community", config.climatology_community.as_str()),
        ("longitude", longitude.as_str()),
        ("latitude", latitude.as_str()),
        ("format", "JSON"),
        ("start", year.as_str()),
        ("end", year.as_str()),
    ])?)
}

/// monthly responses are keyed "YYYYMM", with an additional "YYYY13" annual entry that we skip
pub fn monthly_climatology (response: &PowerResponse)->Result<Vec<MonthlyClimate>> {
    let params = &response.properties.parameter;
    let avg = params.get( AVG_TEMP_PARAM).ok_or_else( || parse_error!("no {} in response", AVG_TEMP_PARAM))?;
    let max = params.get( MAX_TEMP_PARAM).ok_or_else( || parse_error!("no {} in response", MAX_TEMP_PARAM))?;

    let mut list: Vec<MonthlyClimate> = Vec::with_capacity(12);
    for (key,avg_temp) in avg.iter() { // BTreeMap iterates in sorted key order
        if key.len() != 6 { continue }
        let month: usize = match key.get(4..).and_then( |m| m.parse().ok()) {
            Some(m) if (1..=12).contains(&m) => m,
            _ => continue
        };
        let max_temp = max.get( key).ok_or_else( || parse_error!("no {} value for {}", MAX_TEMP_PARAM, key))?;

        list.push( MonthlyClimate {
            month: MONTH_NAMES[month-1].to_string(),
            avg_temp: round1( *avg_temp),
            max_temp: round1( *max_temp),
        });
    }

    Ok(list)
}

/// unlike the reference temperature this does propagate errors - there is no meaningful fallback
pub async fn fetch_monthly_climatology (client: &Client, config: &PowerConfig, latitude: f64, longitude: f64, year: i32)->Result<Vec<MonthlyClimate>> {
    let url = monthly_query_url( config, latitude, longitude, year)?;
    let response: PowerResponse = get_json( client, url).await?;
    monthly_climatology( &response)
}

/* #endregion monthly climatology */
