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

use std::collections::BTreeMap;
use serde::Serialize;
use chrono::{DateTime,Utc};
use strum::IntoEnumIterator;
use albedo_common::{MinMaxAvg, datetime::ser_short_rfc3339};

use crate::{DataQuality, EnrichedRegion, GeoScale, ReferenceTemperature, RiskLevel};

/// the result of one enrichment cycle. Datasets are never updated - a new cycle creates a new one
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct HeatRiskDataset {
    /// name of the region table this was computed for
    pub table: String,
    pub reference: ReferenceTemperature,
    pub regions: Vec<EnrichedRegion>,
    #[serde(serialize_with="ser_short_rfc3339")]
    pub generated: DateTime<Utc>,
}

impl HeatRiskDataset {
    pub fn data_quality (&self)->DataQuality { self.reference.quality }

    pub fn get (&self, id: &str)->Option<&EnrichedRegion> {
        self.regions.iter().find( |r| r.id == id)
    }

    /// the regions a map at the given scale shows, in dataset order
    pub fn visible_at (&self, scale: GeoScale)->impl Iterator<Item=&EnrichedRegion> {
        self.regions.iter().filter( move |r| scale.includes( r.scale))
    }

    pub fn summary (&self)->DatasetSummary {
        DatasetSummary::new( &self.regions, self.data_quality())
    }
}

/// aggregate numbers for stats panels
#[derive(Debug,Clone,PartialEq,Serialize)]
#[serde(rename_all="camelCase")]
pub struct DatasetSummary {
    pub n_regions: usize,
    /// number of regions per level, all levels present
    pub risk_counts: BTreeMap<RiskLevel,usize>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub mean_temp: Option<f64>,
    /// id of the first region with `max_temp`
    pub hottest: Option<String>,
    /// total population of regions at level High or Critical (regions without figures are skipped)
    pub population_at_risk: u64,
    pub data_quality: DataQuality,
}

impl DatasetSummary {
    pub fn new (regions: &[EnrichedRegion], data_quality: DataQuality)->Self {
        let mut risk_counts: BTreeMap<RiskLevel,usize> = RiskLevel::iter().map( |l| (l,0)).collect();
        let mut temps = MinMaxAvg::new();
        let mut hottest: Option<&EnrichedRegion> = None;
        let mut population_at_risk: u64 = 0;

        for r in regions {
            *risk_counts.entry( r.risk_level).or_insert(0) += 1;
            temps.add( r.temperature);

            if hottest.map_or( true, |h| r.temperature > h.temperature) { hottest = Some(r) }

            if r.risk_level >= RiskLevel::High {
                population_at_risk += r.total_population.unwrap_or(0);
            }
        }

        let (min_temp, max_temp, mean_temp) = if temps.is_empty() {
            (None, None, None)
        } else {
            (Some(temps.min), Some(temps.max), Some( albedo_common::round1(temps.avg)))
        };

        DatasetSummary {
            n_regions: regions.len(),
            risk_counts,
            min_temp,
            max_temp,
            mean_temp,
            hottest: hottest.map( |r| r.id.clone()),
            population_at_risk,
            data_quality
        }
    }

    pub fn count (&self, level: RiskLevel)->usize {
        self.risk_counts.get( &level).copied().unwrap_or(0)
    }
}
