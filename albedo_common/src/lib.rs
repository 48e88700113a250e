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

//! common utilities shared by AlbedoMaps crates: HTTP/JSON retrieval, config lookup and
//! small numeric helpers

pub mod macros;
pub mod net;
pub mod config;
pub mod datetime;

/// round to given number of decimals, with ties going towards positive infinity.
/// This is how dashboard clients round displayed values so we keep the same semantics
/// (`f64::round` would round -0.05 to -0.1 instead of -0.0)
#[inline]
pub fn round_half_up (x: f64, decimals: i32)->f64 {
    let scale = 10f64.powi(decimals);
    (x * scale + 0.5).floor() / scale
}

/// round to one decimal (the resolution of all our temperature values)
#[inline]
pub fn round1 (x: f64)->f64 { round_half_up(x, 1) }

// a global fn that can be used with serde(skip_serializing_if="albedo_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone,Copy)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl Default for MinMaxAvg {
    fn default()->Self { Self::new() }
}

impl FromIterator<f64> for MinMaxAvg {
    fn from_iter<I: IntoIterator<Item=f64>> (iter: I)->Self {
        let mut acc = MinMaxAvg::new();
        for x in iter { acc.add(x) }
        acc
    }
}
