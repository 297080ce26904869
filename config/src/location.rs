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

use std::{env, path::PathBuf};

pub const ENV_DUBBO_CONFIG_PATH: &str = "DUBBO_CONFIG_PATH";

pub const ENV_DUBBO_CONFIG_FILE: &str = "DUBBO_CONFIG_FILE";

pub const DEFAULT_CONFIG_FILE: &str = "dubbo.yaml";

// resolve yaml config file
pub fn resolve_config_location() -> PathBuf {
    let dir = match env::var(ENV_DUBBO_CONFIG_PATH) {
        Ok(v) => PathBuf::from(v),
        Err(_) => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let file = env::var(ENV_DUBBO_CONFIG_FILE).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    dir.join(file)
}
