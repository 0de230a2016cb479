//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
}

/// Raw map configuration document.
///
/// Unrecognized top-level keys are ignored.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MapCfg {
    #[serde(default)]
    pub bases: Vec<BaseCfg>,
    #[serde(default)]
    pub overlays: Vec<OverlayCfg>,
    #[serde(default)]
    pub groups: Vec<GroupCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BaseCfg {
    pub id: String,
    pub name: Option<String>,
    /// Layer type. `arcgis` bases require a capability lookup,
    /// everything else is translated synchronously.
    #[serde(rename = "type")]
    pub base_type: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    #[serde(default)]
    pub toggle: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OverlayCfg {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub layers: LayersParam,
    #[serde(rename = "type")]
    pub overlay_type: Option<String>,
    pub projection: Option<String>,
}

/// Service layer list, declared as a single name or a list of names
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum LayersParam {
    One(String),
    Many(Vec<String>),
}

impl Default for LayersParam {
    fn default() -> Self {
        LayersParam::Many(Vec::new())
    }
}

impl LayersParam {
    pub fn join(&self, sep: &str) -> String {
        match self {
            LayersParam::One(name) => name.clone(),
            LayersParam::Many(names) => names.join(sep),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct GroupCfg {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(rename = "subGroups", default)]
    pub sub_groups: Vec<SubGroupCfg>,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SubGroupCfg {
    pub name: String,
    #[serde(default)]
    pub layers: Vec<String>,
}

/// Load and parse the config file into a config struct.
pub fn read_config<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_json = String::new();
    if let Err(err) = file.read_to_string(&mut config_json) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_json, path)
}

/// Parse the configuration into a config struct.
pub fn parse_config<T: DeserializeOwned>(config_json: String, path: &str) -> Result<T, String> {
    // Substitute `{{env.VARNAME}}` expressions
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_json)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let json = tera
        .render(path, &context)
        .map_err(|e| match e.source() {
            Some(source) => format!("Template error: {}", source),
            None => format!("Template error: {}", e),
        })?;

    serde_json::from_str::<T>(&json).map_err(|err| format!("{} - {}", path, err))
}
