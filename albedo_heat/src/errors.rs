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

use thiserror::Error;
use albedo_common;

pub type Result<T> = std::result::Result<T,AlbedoHeatError>;


#[derive(Error,Debug)]
pub enum AlbedoHeatError {
    #[error("parse error {0}")]
    ParseError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("net error {0}")]
    NetError( #[from] albedo_common::net::AlbedoNetError),

    #[error("config error {0}")]
    LoadConfigError( #[from] albedo_common::config::ConfigError),

    #[error("invalid config {0}")]
    InvalidConfigError(String),

    #[error("invalid temperature reading {0}")]
    InvalidReadingError(f64),

    #[error("operation failed {0}")]
    OpFailedError(String)
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::AlbedoHeatError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;

macro_rules! invalid_config {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::AlbedoHeatError::InvalidConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_config;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::AlbedoHeatError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
