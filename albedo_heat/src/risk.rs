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

//! temperature based risk classification and the static per-level lookups (recommendation text,
//! display color) that go with it

use serde::{Serialize,Deserialize};
use strum::{Display, EnumIter, EnumString};
use albedo_common::round_half_up;

use crate::errors::{Result, invalid_config};

/// lower bound of plausible land surface temperatures for the Baixada Cuiabana (°C, exposed soil)
pub const MIN_VALID_TEMP: f64 = 15.0;

/// upper bound of plausible land surface temperatures (°C, asphalt and roof tiles)
pub const MAX_VALID_TEMP: f64 = 68.0;

/// mean "hot day" surface temperature of Cuiabá, used whenever we don't have a valid reading
pub const FALLBACK_TEMP: f64 = 39.2;

/// NASA POWER fill value for missing data
pub const SENTINEL_VALUE: f64 = -999.0;

/// neutral display color for anything we can't classify
pub const UNKNOWN_COLOR: &'static str = "#94a3b8";

/// ordered risk categories. The order is significant: a higher temperature never maps to a lower level
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Display,EnumString,EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum RiskLevel {
    #[serde(rename="Baixo", alias="low")]
    #[strum(to_string="Baixo", serialize="low")]
    Low,

    #[serde(rename="Médio", alias="Medio", alias="medium")]
    #[strum(to_string="Médio", serialize="Medio", serialize="medium")]
    Medium,

    #[serde(rename="Alto", alias="high")]
    #[strum(to_string="Alto", serialize="high")]
    High,

    #[serde(rename="Crítico", alias="Critico", alias="critical")]
    #[strum(to_string="Crítico", serialize="Critico", serialize="critical")]
    Critical,
}

/// inclusive lower bounds, highest first
const RISK_THRESHOLDS: [(f64,RiskLevel);3] = [
    (41.0, RiskLevel::Critical),
    (36.0, RiskLevel::High),
    (31.0, RiskLevel::Medium),
];

impl RiskLevel {
    /// the (Portuguese) label we show and serialize
    pub fn label (&self)->&'static str {
        match self {
            RiskLevel::Low => "Baixo",
            RiskLevel::Medium => "Médio",
            RiskLevel::High => "Alto",
            RiskLevel::Critical => "Crítico",
        }
    }

    /// hex display color for map markers and charts
    pub fn color (&self)->&'static str {
        match self {
            RiskLevel::Critical => "#ef4444",
            RiskLevel::High => "#f97316",
            RiskLevel::Medium => "#eab308",
            RiskLevel::Low => "#22c55e",
        }
    }

    pub fn recommendation (&self)->&'static str {
        recommendation_for( *self)
    }
}

/// step function over [`RISK_THRESHOLDS`]. Boundary values belong to the higher level.
/// NaN fails all comparisons and hence is `Low`
pub fn classify_risk (temperature: f64)->RiskLevel {
    for (threshold,level) in RISK_THRESHOLDS {
        if temperature >= threshold { return level }
    }
    RiskLevel::Low
}

/// policy level advice. This only depends on the level so regions with the same risk get
/// identical text
pub fn recommendation_for (level: RiskLevel)->&'static str {
    match level {
        RiskLevel::Critical => "Emergência Térmica: Proibição de novos desmatamentos e plantio imediato de cinturões verdes.",
        RiskLevel::High => "Arborização Prioritária: Implementar pavimentos claros (Albedo Alto) e corredores ecológicos.",
        RiskLevel::Medium => "Monitoramento: Manutenção de parques e incentivo a telhados verdes.",
        RiskLevel::Low => "Preservação: Área de resiliência. Manter densidade de biomassa atual."
    }
}

/// color for a textual risk label as it might come from a client. Unknown labels get [`UNKNOWN_COLOR`]
pub fn color_for_label (label: &str)->&'static str {
    label.trim().parse::<RiskLevel>().map( |level| level.color()).unwrap_or( UNKNOWN_COLOR)
}

/// plausibility bounds and substitution values applied to all temperature and vegetation data
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ValidationRules {
    pub temp_min: f64,
    pub temp_max: f64,
    pub ndvi_min: u8,
    pub ndvi_max: u8,
    pub fallback_temp: f64,
    /// upstream fill value that is never a valid reading, even if it happens to be within bounds
    pub sentinel: f64,
}

impl Default for ValidationRules {
    fn default()->Self {
        ValidationRules {
            temp_min: MIN_VALID_TEMP,
            temp_max: MAX_VALID_TEMP,
            ndvi_min: 0,
            ndvi_max: 100,
            fallback_temp: FALLBACK_TEMP,
            sentinel: SENTINEL_VALUE,
        }
    }
}

impl ValidationRules {
    /// temp bounds have to be ordered, vegetation bounds within [0,100] and the fallback a valid temperature
    pub fn validate (&self)->Result<()> {
        if !(self.temp_min < self.temp_max) {
            return Err( invalid_config!("temp_min {} not below temp_max {}", self.temp_min, self.temp_max))
        }
        if self.ndvi_min > self.ndvi_max || self.ndvi_max > 100 {
            return Err( invalid_config!("invalid vegetation range [{},{}]", self.ndvi_min, self.ndvi_max))
        }
        if !self.is_valid_temperature( self.fallback_temp) {
            return Err( invalid_config!("fallback temperature {} outside of valid range", self.fallback_temp))
        }
        Ok(())
    }

    pub fn is_valid_temperature (&self, temp: f64)->bool {
        !temp.is_nan() && temp != self.sentinel && temp >= self.temp_min && temp <= self.temp_max
    }

    /// the given value if it is valid, the fallback constant otherwise (substitution, not clamping)
    pub fn valid_or_fallback (&self, temp: f64)->f64 {
        if self.is_valid_temperature(temp) { temp } else { self.fallback_temp }
    }

    /// percent coverage for a [0,1] baseline fraction, clamped into [ndvi_min,ndvi_max].
    /// Unordered bounds are swapped
    pub fn vegetation_coverage (&self, baseline: f64)->u8 {
        let lo = self.ndvi_min.min( self.ndvi_max);
        let hi = self.ndvi_min.max( self.ndvi_max);
        if baseline.is_nan() { return lo }

        let percent = round_half_up( baseline * 100.0, 0);
        percent.clamp( lo as f64, hi as f64) as u8
    }
}
