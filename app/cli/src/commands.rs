//! FILENAME: app/cli/src/commands.rs
// PURPOSE: Subcommand handlers. Each returns the JSON document to print.

use crate::config::DashboardConfig;
use crate::DynError;
use engine::{Dataset, Record};
use persistence::ensure_dataset;
use pivot_engine::{aggregate, apply_filters, compute_kpis, FilterContext};
use scene_engine::build_scene;
use serde_json::{json, Value};

fn load(config: &DashboardConfig) -> Result<Dataset, DynError> {
    Ok(ensure_dataset(&config.data_path, &config.generator)?)
}

fn filtered<'a>(
    dataset: &'a Dataset,
    filter: &FilterContext,
) -> Result<Vec<&'a Record>, DynError> {
    Ok(apply_filters(dataset, filter)?)
}

pub fn generate(config: &DashboardConfig) -> Result<Value, DynError> {
    let dataset = load(config)?;
    let bounds = dataset.date_bounds();

    Ok(json!({
        "location": config.data_path.display().to_string(),
        "records": dataset.len(),
        "first_date": bounds.map(|(lo, _)| lo.to_string()),
        "last_date": bounds.map(|(_, hi)| hi.to_string()),
        "segments": dataset.segments(),
        "products": dataset.products(),
    }))
}

pub fn aggregate_cells(
    config: &DashboardConfig,
    filter: &FilterContext,
) -> Result<Value, DynError> {
    let dataset = load(config)?;
    let records = filtered(&dataset, filter)?;
    let cells = aggregate(records, config.scene.metric);

    Ok(json!({
        "metric": config.scene.metric,
        "label": config.scene.metric.label(),
        "cells": cells,
    }))
}

pub fn scene(
    config: &DashboardConfig,
    filter: &FilterContext,
    mesh: bool,
) -> Result<Value, DynError> {
    let dataset = load(config)?;
    let records = filtered(&dataset, filter)?;
    let scene = build_scene(records, config.scene.metric, &config.scene.options())?;

    if mesh {
        Ok(serde_json::to_value(scene.mesh_buffer())?)
    } else {
        Ok(serde_json::to_value(&scene)?)
    }
}

pub fn kpis(config: &DashboardConfig, filter: &FilterContext) -> Result<Value, DynError> {
    let dataset = load(config)?;
    let records = filtered(&dataset, filter)?;
    let summary = compute_kpis(records);

    Ok(json!({
        "summary": summary,
        "cards": summary.cards(),
    }))
}
