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

use std::sync::atomic::{AtomicBool, Ordering};

pub use tracing::{self, Level};

// flag for the sake of avoiding multiple initialization
static TRACING_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Env key holding the default log level, e.g. `DUBBO_LOG_LEVEL=debug`.
pub const LOG_LEVEL_ENV_KEY: &str = "DUBBO_LOG_LEVEL";

mod level;
mod tracing_configurer;

pub use level::parse_level;

// put on main method
pub fn init() {
    let level = std::env::var(LOG_LEVEL_ENV_KEY).unwrap_or_default();
    init_with_level(&level);
}

/// Installs the global subscriber with the given level name.
///
/// Only the first call has any effect, later calls (including the ones made
/// by tests running in the same process) are ignored.
pub fn init_with_level(level: &str) {
    if TRACING_CONFIGURED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        tracing_configurer::install(parse_level(level));
    }
}

pub fn is_configured() -> bool {
    TRACING_CONFIGURED.load(Ordering::SeqCst)
}
