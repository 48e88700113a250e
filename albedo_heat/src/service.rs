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

//! the enrichment cycle: one reference temperature from the configured source, then enrichment
//! of the (shared, read-only) region table

use std::sync::Arc;
use serde::{Serialize,Deserialize};
use tracing::info;
use albedo_common::datetime::utc_now;

use crate::{
    FixedSource, HeatRiskDataset, ReferenceTemperature, ReferenceTemperatureSource, RegionTable, ValidationRules,
    enrich_regions,
    arcgis::{ArcGisSource, FeatureServiceConfig},
    nasa_power::{NasaPowerSource, PowerConfig},
    errors::{Result, invalid_config}
};

/// top level configuration of heat risk applications
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct HeatRiskConfig {
    /// config filename of the region table, e.g. "cuiaba.ron"
    pub region_table: String,
    pub rules: ValidationRules,
    pub power: PowerConfig,
    #[serde(default)]
    pub feature_service: Option<FeatureServiceConfig>,
}

impl Default for HeatRiskConfig {
    fn default()->Self {
        HeatRiskConfig {
            region_table: "cuiaba.ron".to_string(),
            rules: ValidationRules::default(),
            power: PowerConfig::default(),
            feature_service: None,
        }
    }
}

impl HeatRiskConfig {
    pub fn validate (&self)->Result<()> {
        self.rules.validate()
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum SourceKind {
    NasaPower,
    ArcGis,
    Fixed(f64)
}

pub fn create_source (config: &HeatRiskConfig, kind: SourceKind)->Result<Box<dyn ReferenceTemperatureSource>> {
    Ok( match kind {
        SourceKind::NasaPower => Box::new( NasaPowerSource::new( config.power.clone())?),
        SourceKind::ArcGis => {
            let fs_config = config.feature_service.as_ref().ok_or_else( || invalid_config!("no feature_service configured"))?;
            Box::new( ArcGisSource::new( fs_config.clone())?)
        }
        SourceKind::Fixed(value) => Box::new( FixedSource::new( value))
    })
}

pub struct HeatRiskService {
    table: Arc<RegionTable>,
    rules: ValidationRules,
    source: Box<dyn ReferenceTemperatureSource>,
}

impl HeatRiskService {
    /// fails if the rules are not consistent
    pub fn new (table: Arc<RegionTable>, rules: ValidationRules, source: Box<dyn ReferenceTemperatureSource>)->Result<Self> {
        rules.validate()?;
        Ok( HeatRiskService { table, rules, source } )
    }

    /// load the configured region table and create the requested source
    pub fn from_config (config: &HeatRiskConfig, kind: SourceKind)->Result<Self> {
        config.validate()?;
        let table = Arc::new( RegionTable::load( &config.region_table)?);
        let source = create_source( config, kind)?;
        Self::new( table, config.rules.clone(), source)
    }

    pub fn table (&self)->&Arc<RegionTable> { &self.table }

    pub fn rules (&self)->&ValidationRules { &self.rules }

    pub fn source_name (&self)->&str { self.source.name() }

    /// run a complete cycle. This does not fail - upstream problems show up as `DataQuality::Fallback`
    pub async fn refresh (&self)->HeatRiskDataset {
        let reference = self.source.reference_temperature( &self.rules).await;
        info!("enriching {} regions of '{}' with {} reference {}°C ({:?})",
              self.table.len(), self.table.name, reference.source, reference.value, reference.quality);
        self.dataset_for( reference)
    }

    /// the enrichment part of a cycle for an already obtained reference
    pub fn dataset_for (&self, reference: ReferenceTemperature)->HeatRiskDataset {
        let regions = enrich_regions( reference.value, &self.table.regions, &self.rules);
        HeatRiskDataset { table: self.table.name.clone(), reference, regions, generated: utc_now() }
    }
}
