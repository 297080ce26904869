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

use serde::{Deserialize, Serialize};

pub const DEFAULT_INVOKER_CACHE_CAPACITY: usize = 10000;

pub const DEFAULT_THROWABLE_CACHE_CAPACITY: usize = 1000;

/// Settings of the consumer side decision layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Name of the load balance extension used when the url names none.
    #[serde(default = "default_loadbalance")]
    pub loadbalance: String,

    #[serde(default)]
    pub mock: MockConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            loadbalance: default_loadbalance(),
            mock: MockConfig::default(),
        }
    }
}

fn default_loadbalance() -> String {
    "random".to_string()
}

/// Bounds of the mock caches. A full cache stops retaining new keys, nothing is evicted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MockConfig {
    #[serde(default = "default_invoker_cache_capacity")]
    pub invoker_cache_capacity: usize,

    #[serde(default = "default_throwable_cache_capacity")]
    pub throwable_cache_capacity: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            invoker_cache_capacity: DEFAULT_INVOKER_CACHE_CAPACITY,
            throwable_cache_capacity: DEFAULT_THROWABLE_CACHE_CAPACITY,
        }
    }
}

fn default_invoker_cache_capacity() -> usize {
    DEFAULT_INVOKER_CACHE_CAPACITY
}

fn default_throwable_cache_capacity() -> usize {
    DEFAULT_THROWABLE_CACHE_CAPACITY
}
