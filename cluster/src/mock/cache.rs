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

use dashmap::DashMap;
use dubbo_logger::tracing::{debug, warn};

/// Insert-if-below-bound cache keyed by the raw directive string.
///
/// Nothing is ever evicted: once `capacity` entries are held, values for new
/// keys are still computed and returned but no longer retained. Two callers
/// racing on the same key may both compute it; the first insert wins and both
/// get that value back.
#[derive(Debug)]
pub struct BoundedCache<V> {
    name: &'static str,
    capacity: usize,
    entries: DashMap<String, V>,
    full_reported: AtomicBool,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        BoundedCache {
            name,
            capacity,
            entries: DashMap::new(),
            full_reported: AtomicBool::new(false),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    /// Returns the cached value for `key`, computing it with `create` on a miss.
    ///
    /// `create` runs without any lock held.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, create: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = create()?;
        if self.entries.len() < self.capacity {
            let kept = self
                .entries
                .entry(key.to_string())
                .or_insert(value)
                .value()
                .clone();
            debug!("{} cache keeps entry: {}", self.name, key);
            return Ok(kept);
        }

        if !self.full_reported.swap(true, Ordering::Relaxed) {
            warn!(
                "{} cache reached its capacity {}, new entries are no longer retained",
                self.name, self.capacity
            );
        }
        Ok(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
