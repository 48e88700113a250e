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

//! explicitly labeled mock data for demos and UI development. Everything in here is seeded and
//! reproducible, and nothing in here is used by the enrichment path

use serde::{Serialize,Deserialize};
use rand::{Rng, SeedableRng, rngs::StdRng};
use albedo_common::{round1, round_half_up};

use crate::{RegionDescriptor, RegionTable, MapPosition, ScaleTag, nasa_power::MONTH_NAMES};

/// one month of the (historical) thermal series shown in the analytics panel
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct ThermalDataPoint {
    pub month: String,
    pub avg_temp: f64,
    pub max_temp: f64,
    /// NDVI in [-1,1]
    pub ndvi: f64,
}

// (avg,max,ndvi) of a typical year in Cuiabá, Jan..Dez
const REFERENCE_SERIES: [(f64,f64,f64);12] = [
    (32.0, 36.0, 0.6),
    (31.0, 35.0, 0.65),
    (31.0, 35.0, 0.7),
    (30.0, 34.0, 0.68),
    (28.0, 33.0, 0.55),
    (27.0, 32.0, 0.45),
    (28.0, 34.0, 0.35),
    (33.0, 39.0, 0.25),
    (36.0, 42.0, 0.2),
    (35.0, 41.0, 0.25),
    (33.0, 38.0, 0.4),
    (32.0, 36.0, 0.55),
];

impl ThermalDataPoint {
    /// the fixed reference series
    pub fn reference_series ()->Vec<ThermalDataPoint> {
        MONTH_NAMES.iter().zip( REFERENCE_SERIES.iter())
            .map( |(month,(avg_temp,max_temp,ndvi))| ThermalDataPoint {
                month: month.to_string(), avg_temp: *avg_temp, max_temp: *max_temp, ndvi: *ndvi
            })
            .collect()
    }
}

pub struct MockDataGenerator {
    rng: StdRng,
}

impl MockDataGenerator {
    pub fn new (seed: u64)->Self {
        MockDataGenerator { rng: StdRng::seed_from_u64( seed) }
    }

    /// `n` local regions with offsets in [-8,6] °C, random vegetation and population and map positions in [5%,95%]
    pub fn region_table (&mut self, n: usize)->RegionTable {
        let regions = (1..=n).map( |i| self.region( i)).collect();
        RegionTable { name: "mock".to_string(), regions }
    }

    fn region (&mut self, i: usize)->RegionDescriptor {
        let x: u32 = self.rng.random_range( 5..=95);
        let y: u32 = self.rng.random_range( 5..=95);

        RegionDescriptor {
            id: format!("mock_{i:02}"),
            name: format!("Região Simulada {i:02}"),
            temperature_offset: round1( self.rng.random_range( -8.0..=6.0)),
            vegetation_baseline: round_half_up( self.rng.random::<f64>(), 2).min(1.0),
            population_density: Some( self.rng.random_range( 10..=9000)),
            total_population: Some( self.rng.random_range( 1000..=120_000)),
            scale: ScaleTag::Local,
            map_position: MapPosition::new( format!("{x}%"), format!("{y}%")),
        }
    }

    /// the reference temperatures with a simulated NDVI in [0.2,0.7] (we don't have Landsat data)
    pub fn historical_series (&mut self)->Vec<ThermalDataPoint> {
        let mut series = ThermalDataPoint::reference_series();
        for p in series.iter_mut() {
            p.ndvi = round_half_up( 0.2 + self.rng.random::<f64>() * 0.5, 2);
        }
        series
    }
}
