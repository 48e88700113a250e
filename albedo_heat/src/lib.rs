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

//! heat-island risk data core of AlbedoMaps.
//!
//! One enrichment cycle obtains a single reference surface temperature from a
//! [`ReferenceTemperatureSource`] (NASA POWER, an ArcGIS feature service or a fixed value) and
//! derives a risk-annotated [`EnrichedRegion`] for each entry of a configured [`RegionTable`].
//! The result is a [`HeatRiskDataset`] that gets handed to presentation clients.

use serde::{Serialize,Deserialize};
use async_trait::async_trait;

pub mod errors;
pub use errors::{AlbedoHeatError, Result};

pub mod risk;
pub use risk::*;

pub mod regions;
pub use regions::*;

pub mod enrichment;
pub use enrichment::*;

pub mod nasa_power;
pub mod arcgis;
pub mod mock;

pub mod dataset;
pub use dataset::*;

pub mod service;
pub use service::*;

pub mod web;

albedo_common::define_load_config!{}

/// tells clients if a reference temperature (and hence all derived data) is based on a live
/// reading or on the configured fallback constant
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum DataQuality {
    Live,
    Fallback
}

/// the scalar from which all regional temperatures of a cycle are derived
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ReferenceTemperature {
    /// °C, always within the valid range of the rules it was obtained with
    pub value: f64,
    pub quality: DataQuality,
    /// name of the source that produced (or failed to produce) this value
    pub source: String,
}

impl ReferenceTemperature {
    pub fn live (value: f64, source: impl ToString)->Self {
        ReferenceTemperature { value, quality: DataQuality::Live, source: source.to_string() }
    }

    pub fn fallback (rules: &ValidationRules, source: impl ToString)->Self {
        ReferenceTemperature { value: rules.fallback_temp, quality: DataQuality::Fallback, source: source.to_string() }
    }

    pub fn is_live (&self)->bool { self.quality == DataQuality::Live }
}

/// the seam between the enrichment cycle and the outside world. Implementations must not fail -
/// any upstream problem has to be logged and turned into a `ReferenceTemperature::fallback(..)`
#[async_trait]
pub trait ReferenceTemperatureSource: Send + Sync {
    fn name (&self)->&str;

    async fn reference_temperature (&self, rules: &ValidationRules)->ReferenceTemperature;
}

/// a source that always reports the same (operator provided) value. Out of range values are
/// replaced by the fallback like any other invalid reading
#[derive(Debug,Clone)]
pub struct FixedSource {
    value: f64
}

impl FixedSource {
    pub fn new (value: f64)->Self { FixedSource { value } }
}

#[async_trait]
impl ReferenceTemperatureSource for FixedSource {
    fn name (&self)->&str { "fixed" }

    async fn reference_temperature (&self, rules: &ValidationRules)->ReferenceTemperature {
        if rules.is_valid_temperature( self.value) {
            ReferenceTemperature::live( albedo_common::round1( self.value), self.name())
        } else {
            tracing::warn!("fixed reference temperature {} out of range, using fallback", self.value);
            ReferenceTemperature::fallback( rules, self.name())
        }
    }
}
