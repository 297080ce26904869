/*
 * Licensed to the Apache Software Foundation (ASF) under one or more
 * contributor license agreements.  See the NOTICE file distributed with
 * this work for additional information regarding copyright ownership.
 * The ASF licenses this file to You under the Apache License, Version 2.0
 * (the "License"); you may not use this file except in compliance with
 * the License.  You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context, Error};
use dubbo_logger::tracing;
use serde::{Deserialize, Serialize};

use crate::{
    location::resolve_config_location,
    types::{cluster::ClusterConfig, logger::LoggerConfig},
    DUBBO_KEY,
};

/// used to storage all structed config, from some source: yaml file, api..
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl RootConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a yaml document whose top level key is `dubbo`.
    pub fn from_yaml_str(data: &str) -> Result<Self, Error> {
        let conf: HashMap<String, RootConfig> =
            serde_yaml::from_str(data).context("invalid dubbo yaml config")?;
        tracing::debug!("origin config: {:?}", conf);
        conf.get(DUBBO_KEY)
            .cloned()
            .ok_or_else(|| anyhow!("missing top level key '{}'", DUBBO_KEY))
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(anyhow!("path is not a file: {:?}", path));
        }
        let data = fs::read_to_string(path)?;
        Self::from_yaml_str(&data).with_context(|| format!("failed to load {:?}", path))
    }

    /// Loads the file named by `DUBBO_CONFIG_PATH` / `DUBBO_CONFIG_FILE`.
    pub fn load() -> Result<Self, Error> {
        let path = resolve_config_location();
        tracing::info!("load dubbo config from: {:?}", path);
        Self::load_from(&path)
    }

    pub(crate) fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("fall back to default config, cause: {:#}", err);
                Self::default()
            }
        }
    }
}
