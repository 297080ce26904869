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

use once_cell::sync::Lazy;

pub use crate::config::RootConfig;
pub use crate::types::cluster::{ClusterConfig, MockConfig};
pub use crate::types::logger::LoggerConfig;
pub use location::resolve_config_location;

pub mod config;
pub mod location;
pub mod types;

pub const DUBBO_KEY: &str = "dubbo";

pub(crate) static DUBBO_CONFIG: Lazy<RootConfig> = Lazy::new(RootConfig::load_or_default);

/// The process-wide config, read once from [`resolve_config_location`].
pub fn get_root_config() -> &'static RootConfig {
    &DUBBO_CONFIG
}
