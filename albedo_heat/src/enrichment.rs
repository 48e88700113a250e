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

//! the region enrichment engine. This is a pure function of one reference temperature, a set
//! of region descriptors and the validation rules - no I/O, no clock, no randomness

use serde::Serialize;
use tracing::debug;
use albedo_common::{is_none, round1};

use crate::{RegionDescriptor, ScaleTag, MapPosition, RiskLevel, ValidationRules, classify_risk, recommendation_for};

/// a region descriptor annotated with the values derived for one enrichment cycle.
/// This is what presentation clients get (serialized in camelCase)
#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(rename_all="camelCase")]
pub struct EnrichedRegion {
    pub id: String,
    pub name: String,
    pub temperature_offset: f64,
    pub vegetation_baseline: f64,

    #[serde(skip_serializing_if="is_none")]
    pub population_density: Option<u64>,

    #[serde(skip_serializing_if="is_none")]
    pub total_population: Option<u64>,

    pub scale: ScaleTag,
    pub map_position: MapPosition,

    /// °C, rounded to one decimal and within the valid bounds of the rules used
    pub temperature: f64,

    /// percent in [0,100]
    pub vegetation_coverage: u8,

    pub risk_level: RiskLevel,
    pub recommendation: &'static str,
}

impl EnrichedRegion {
    pub fn color (&self)->&'static str { self.risk_level.color() }
}

/// reference temperature plus regional offset, rounded to one decimal. Invalid results are
/// replaced by the fallback constant
pub fn local_temperature (reference_temp: f64, offset: f64, rules: &ValidationRules)->f64 {
    let raw = round1( reference_temp + offset);
    if rules.is_valid_temperature( raw) {
        raw
    } else {
        debug!("local temperature {} out of range, using fallback {}", raw, rules.fallback_temp);
        rules.fallback_temp
    }
}

pub fn enrich_region (reference_temp: f64, region: &RegionDescriptor, rules: &ValidationRules)->EnrichedRegion {
    let temperature = local_temperature( reference_temp, region.temperature_offset, rules);
    let vegetation_coverage = rules.vegetation_coverage( region.vegetation_baseline);
    let risk_level = classify_risk( temperature);

    EnrichedRegion {
        id: region.id.clone(),
        name: region.name.clone(),
        temperature_offset: region.temperature_offset,
        vegetation_baseline: region.vegetation_baseline,
        population_density: region.population_density,
        total_population: region.total_population,
        scale: region.scale,
        map_position: region.map_position.clone(),
        temperature,
        vegetation_coverage,
        risk_level,
        recommendation: recommendation_for( risk_level),
    }
}

/// one output per descriptor, in input order
pub fn enrich_regions (reference_temp: f64, regions: &[RegionDescriptor], rules: &ValidationRules)->Vec<EnrichedRegion> {
    regions.iter().map( |r| enrich_region( reference_temp, r, rules)).collect()
}
