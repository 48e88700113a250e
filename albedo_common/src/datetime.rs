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

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serializer;
use std::time::Duration;

// Duration ctor for config defaults
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// this should be used wherever we might have to use a sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// the UTC calendar date `lag_days` before `now`
pub fn lagged_date (now: &DateTime<Utc>, lag_days: u32)->NaiveDate {
    (*now - TimeDelta::days( lag_days as i64)).date_naive()
}

/// compact date format used by NASA POWER queries and response keys, e.g. "20260910"
pub fn yyyymmdd (date: &NaiveDate)->String {
    date.format("%Y%m%d").to_string()
}

//--- support for serde

/// second resolution UTC timestamp, e.g. "2026-09-14T12:00:00Z"
pub fn ser_short_rfc3339<S: Serializer> (dt: &DateTime<Utc>, s: S)->Result<S::Ok, S::Error> {
    let dfm = format!("{}", dt.format("%Y-%m-%dT%H:%M:%SZ"));
    s.serialize_str(&dfm)
}
