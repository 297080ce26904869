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

pub const INTERFACE_KEY: &str = "interface";

pub const GROUP_KEY: &str = "group";

pub const VERSION_KEY: &str = "version";

pub const ANYHOST_KEY: &str = "anyhost";

pub const TIMESTAMP_KEY: &str = "timestamp";

pub const DEFAULT_KEY: &str = "default";

pub const DOT_SEPARATOR: &str = ".";

pub const LOADBALANCE_KEY: &str = "loadbalance";

pub const DEFAULT_LOADBALANCE: &str = "random";

pub const PROXY_KEY: &str = "proxy";

pub const DEFAULT_PROXY: &str = "default";

pub const WEIGHT_KEY: &str = "weight";

pub const DEFAULT_WEIGHT: u32 = 100;

pub const WARMUP_KEY: &str = "warmup";

/// Ten minutes, in milliseconds.
pub const DEFAULT_WARMUP: u64 = 10 * 60 * 1000;

pub const MOCK_KEY: &str = "mock";

pub const RETURN_KEY: &str = "return";

pub const THROW_KEY: &str = "throw";

pub const FAIL_KEY: &str = "fail";

pub const FORCE_KEY: &str = "force";

pub const FAIL_PREFIX: &str = "fail:";

pub const FORCE_PREFIX: &str = "force:";

/// Suffix appended to the interface name to locate the default mock implementation.
pub const MOCK_SUFFIX: &str = "Mock";
