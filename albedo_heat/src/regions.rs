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

//! static region reference data. Region tables are configuration (RON) so that different
//! geographic scopes are just different tables for the same enrichment engine

use std::{collections::HashSet, path::Path};
use serde::{Serialize,Deserialize};
use strum::{Display, EnumIter, EnumString};
use albedo_common::config::load_config_path;

use crate::{load_config, errors::{Result, invalid_config}};

/// the zoom level class at which a region is shown on the map
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,EnumIter)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase", ascii_case_insensitive)]
pub enum ScaleTag {
    Local,
    Regional,
    State
}

/// map views. Each one shows all regions of its own scale and the finer ones
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,EnumIter)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase", ascii_case_insensitive)]
pub enum GeoScale {
    Cuiaba,
    Baixada,
    MatoGrosso
}

impl GeoScale {
    pub fn includes (&self, scale: ScaleTag)->bool {
        match self {
            GeoScale::Cuiaba => scale == ScaleTag::Local,
            GeoScale::Baixada => scale == ScaleTag::Local || scale == ScaleTag::Regional,
            GeoScale::MatoGrosso => true
        }
    }

    pub fn label (&self)->&'static str {
        match self {
            GeoScale::Cuiaba => "Cuiabá (Urbano)",
            GeoScale::Baixada => "Baixada Cuiabana",
            GeoScale::MatoGrosso => "Estado de Mato Grosso"
        }
    }
}

/// relative map placement as CSS percentage strings ("50%"). We never interpret these
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct MapPosition {
    pub x: String,
    pub y: String,
}

impl MapPosition {
    pub fn new (x: impl ToString, y: impl ToString)->Self {
        MapPosition { x: x.to_string(), y: y.to_string() }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RegionDescriptor {
    pub id: String,
    pub name: String,

    /// known microclimate deviation from the reference temperature in °C
    pub temperature_offset: f64,

    /// NDVI-like vegetation fraction in [0,1]
    pub vegetation_baseline: f64,

    /// inhabitants per km²
    #[serde(default)]
    pub population_density: Option<u64>,

    #[serde(default)]
    pub total_population: Option<u64>,

    pub scale: ScaleTag,
    pub map_position: MapPosition,
}

impl RegionDescriptor {
    fn local (id: &str, name: &str, x: &str, y: &str, density: u64, pop: u64, offset: f64, ndvi: f64)->Self {
        Self::with_scale( ScaleTag::Local, id, name, x, y, density, pop, offset, ndvi)
    }

    fn regional (id: &str, name: &str, x: &str, y: &str, density: u64, pop: u64, offset: f64, ndvi: f64)->Self {
        Self::with_scale( ScaleTag::Regional, id, name, x, y, density, pop, offset, ndvi)
    }

    fn with_scale (scale: ScaleTag, id: &str, name: &str, x: &str, y: &str, density: u64, pop: u64, offset: f64, ndvi: f64)->Self {
        RegionDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            temperature_offset: offset,
            vegetation_baseline: ndvi,
            population_density: Some(density),
            total_population: Some(pop),
            scale,
            map_position: MapPosition::new( x, y),
        }
    }
}

/// a named, ordered set of regions. The order is the presentation order and is kept by enrichment
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RegionTable {
    pub name: String,
    pub regions: Vec<RegionDescriptor>,
}

impl RegionTable {
    pub fn new (name: impl ToString, regions: Vec<RegionDescriptor>)->Result<Self> {
        let table = RegionTable { name: name.to_string(), regions };
        table.validate()?;
        Ok(table)
    }

    /// load from one of our configs (see `albedo_common::config` for lookup)
    pub fn load (filename: &str)->Result<Self> {
        let table: RegionTable = load_config( filename)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let table: RegionTable = load_config_path( path)?;
        table.validate()?;
        Ok(table)
    }

    /// region ids have to be unique, offsets finite and vegetation baselines within [0,1]
    pub fn validate (&self)->Result<()> {
        let mut ids: HashSet<&str> = HashSet::with_capacity( self.regions.len());

        for r in &self.regions {
            if !ids.insert( r.id.as_str()) {
                return Err( invalid_config!("duplicate region id '{}' in table '{}'", r.id, self.name))
            }
            if !r.temperature_offset.is_finite() {
                return Err( invalid_config!("non-finite temperature offset for region '{}'", r.id))
            }
            if !(0.0..=1.0).contains( &r.vegetation_baseline) {
                return Err( invalid_config!("vegetation baseline {} of region '{}' not within [0,1]", r.vegetation_baseline, r.id))
            }
        }
        Ok(())
    }

    pub fn get (&self, id: &str)->Option<&RegionDescriptor> {
        self.regions.iter().find( |r| r.id == id)
    }

    pub fn len (&self)->usize { self.regions.len() }

    pub fn is_empty (&self)->bool { self.regions.is_empty() }

    /// the built-in Cuiabá / Várzea Grande / Baixada Cuiabana table.
    /// Positions assume downtown Cuiabá at 50%,50% with Várzea Grande west of the Cuiabá river
    pub fn cuiaba ()->Self {
        use RegionDescriptor as R;

        let regions = vec![
            //--- Cuiabá urban area
            R::local( "centro", "Centro Norte", "50%", "48%", 8500, 12000, 5.2, 0.04),
            R::local( "cpa", "Grande CPA (I a IV)", "72%", "32%", 5200, 110000, 3.1, 0.14),
            R::local( "porto", "Porto / Orla", "42%", "52%", 2800, 15000, 4.8, 0.08),
            R::local( "coxipo", "Coxipó / Fernando Corrêa", "58%", "75%", 4100, 98000, 2.4, 0.20),
            R::local( "ufmt", "Campus UFMT", "58%", "65%", 800, 30000, -4.2, 0.78),
            R::local( "bosque", "Bosque da Saúde", "56%", "42%", 3200, 14000, 3.8, 0.22),
            R::local( "tijucal", "Tijucal / Osmar Cabral", "70%", "85%", 4500, 45000, 2.1, 0.16),
            R::local( "parquecuiaba", "Parque Cuiabá", "45%", "90%", 3800, 22000, 1.5, 0.28),

            //--- Várzea Grande
            R::local( "vg_centro", "VG Centro", "25%", "55%", 2100, 85000, 3.2, 0.09),
            R::local( "vg_cristorei", "Cristo Rei (VG)", "35%", "68%", 1800, 60000, 2.8, 0.12),

            //--- Baixada Cuiabana
            R::regional( "chapada", "Chapada dos Guimarães", "92%", "12%", 12, 22000, -7.5, 0.92),
            R::regional( "leverger", "Santo Antônio do Leverger", "55%", "96%", 10, 19000, -1.2, 0.65),
        ];

        RegionTable { name: "cuiaba".to_string(), regions }
    }
}

impl Default for RegionTable {
    fn default()->Self { Self::cuiaba() }
}
