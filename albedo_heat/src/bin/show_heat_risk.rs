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

//! run one heat risk enrichment cycle and print the result

use std::{path::PathBuf, sync::Arc};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use anyhow::Result;

use albedo_heat::{
    load_config, create_source, GeoScale, HeatRiskConfig, HeatRiskDataset, HeatRiskService, RegionTable, RiskLevel, SourceKind
};

#[derive(Debug,Clone,Copy,ValueEnum)]
enum SourceArg {
    Power,
    Arcgis,
    Fixed
}

/// show heat risk classification of configured regions
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    /// where to get the reference temperature from
    #[arg(long, value_enum, default_value_t=SourceArg::Power)]
    source: SourceArg,

    /// reference temperature in °C for `--source fixed`
    #[arg(long, default_value_t=albedo_heat::FALLBACK_TEMP)]
    reference_temp: f64,

    /// RON file with a region table (default is the configured table)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// only show regions visible at this map scale (cuiaba, baixada, matogrosso)
    #[arg(long)]
    scale: Option<GeoScale>,

    /// print dataset as JSON
    #[arg(long)]
    json: bool,

    /// name of the heat risk config file
    #[arg(long, default_value="heat_risk.ron")]
    config: String,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let args = Args::parse();
    let config: HeatRiskConfig = load_config( &args.config)?;
    config.validate()?;

    let table = match &args.regions {
        Some(path) => RegionTable::from_path( path)?,
        None => RegionTable::load( &config.region_table)?
    };

    let kind = match args.source {
        SourceArg::Power => SourceKind::NasaPower,
        SourceArg::Arcgis => SourceKind::ArcGis,
        SourceArg::Fixed => SourceKind::Fixed( args.reference_temp),
    };
    let service = HeatRiskService::new( Arc::new(table), config.rules.clone(), create_source( &config, kind)?)?;
    let dataset = service.refresh().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty( &dataset)?);
    } else {
        print_dataset( &dataset, args.scale);
    }

    Ok(())
}

fn print_dataset (dataset: &HeatRiskDataset, scale: Option<GeoScale>) {
    let reference = &dataset.reference;
    println!("region table:  {}", dataset.table);
    println!("reference:     {:.1}°C from {} ({:?})", reference.value, reference.source, reference.quality);
    if let Some(scale) = scale { println!("scale:         {}", scale.label()); }
    println!();

    println!("{:<16} {:<28} {:>7} {:>5} {:<8} {:>9}", "id", "name", "temp", "veg", "risk", "pop");
    for r in dataset.regions.iter().filter( |r| scale.map_or( true, |s| s.includes( r.scale))) {
        let pop = r.total_population.map( |p| p.to_string()).unwrap_or_else( || "-".to_string());
        println!("{:<16} {:<28} {:>6.1}° {:>4}% {:<8} {:>9}", r.id, r.name, r.temperature, r.vegetation_coverage, r.risk_level, pop);
    }
    println!();

    let summary = dataset.summary();
    for level in [RiskLevel::Critical, RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        println!("{:<8} {:>3}  {}", level, summary.count(level), level.recommendation());
    }
    println!("population at risk: {}", summary.population_at_risk);
}
