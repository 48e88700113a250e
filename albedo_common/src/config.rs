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

//! runtime config lookup. Configs are RON files that deserialize into the config structs of
//! the crate that uses them. Lookup order for `<file>` of crate `<crate>` is
//!
//!   1. `$ALBEDO_HOME/configs/<crate>/<file>`
//!   2. `$HOME/.albedo/configs/<crate>/<file>`
//!   3. `<crate-manifest-dir>/configs/<file>` (the defaults that come with the sources)
//!
//! Crates expand `define_load_config!{}` at the top of their lib.rs to get a `load_config(..)`
//! function that is bound to their package name and manifest dir.

use std::{env, fs, path::{Path, PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::define_error;

pub const CONFIGS: &'static str = "configs";

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "config RON error: {0}",
    NotFoundError(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// load and deserialize a config from an explicit path
pub fn load_config_path<C,P> (path: P)->Result<C> where C: for<'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read_to_string( path.as_ref())?;
    Ok( ron::from_str( &data)? )
}

/// locate a config file for the given crate, see module doc for the lookup order
pub fn find_config_file (crate_name: &str, manifest_dir: &str, filename: &str)->Option<PathBuf> {
    if let Ok(home) = env::var("ALBEDO_HOME") {
        let path = Path::new( &home).join( CONFIGS).join( crate_name).join( filename);
        if path.is_file() { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let path = Path::new( &usr_home).join(".albedo").join( CONFIGS).join( crate_name).join( filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new( manifest_dir).join( CONFIGS).join( filename);
    if path.is_file() { Some(path) } else { None }
}

pub fn load_crate_config<C> (crate_name: &str, manifest_dir: &str, filename: &str)->Result<C> where C: for<'a> Deserialize<'a> {
    match find_config_file( crate_name, manifest_dir, filename) {
        Some(path) => {
            debug!("loading config {:?}", path);
            load_config_path( &path)
        }
        None => Err( ConfigError::NotFoundError( format!("{crate_name}/{filename}")))
    }
}

/// the main macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        pub fn load_config<C> (filename: &str)->std::result::Result<C, $crate::config::ConfigError>
            where C: for<'a> serde::Deserialize<'a>
        {
            $crate::config::load_crate_config( env!("CARGO_PKG_NAME"), env!("CARGO_MANIFEST_DIR"), filename)
        }
    }
}
