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

use std::{fmt::Debug, sync::Arc};

use dashmap::DashMap;
use dubbo_base::Url;
use dubbo_logger::tracing::debug;
use dubbo_rpc::RpcError;

/// Named strategy instances of one kind, e.g. every load balance policy.
pub struct ExtensionLoader<T: ?Sized> {
    kind: &'static str,
    default_name: String,
    extensions: DashMap<String, Arc<T>>,
}

impl<T: ?Sized> ExtensionLoader<T> {
    pub fn new(kind: &'static str, default_name: &str) -> Self {
        ExtensionLoader {
            kind,
            default_name: default_name.to_string(),
            extensions: DashMap::new(),
        }
    }

    /// Replaces the name resolved when neither the url nor the caller names one.
    pub fn with_default_name(mut self, default_name: &str) -> Self {
        self.default_name = default_name.to_string();
        self
    }

    /// Registers `extension` under `name`, returning the one it replaced.
    pub fn register(&self, name: &str, extension: Arc<T>) -> Option<Arc<T>> {
        debug!("register {} extension: {}", self.kind, name);
        self.extensions.insert(name.to_string(), extension)
    }

    pub fn get(&self, name: &str) -> Result<Arc<T>, RpcError> {
        self.extensions
            .get(name)
            .map(|ext| ext.value().clone())
            .ok_or_else(|| {
                RpcError::config(format!(
                    "{} extension loader error: extension name {} not found",
                    self.kind, name
                ))
            })
    }

    pub fn get_default(&self) -> Result<Arc<T>, RpcError> {
        self.get(&self.default_name)
    }

    /// Resolves the extension named by `{method}.{key}` or `key` on the url, else the default.
    pub fn get_adaptive(&self, url: &Url, method: &str, key: &str) -> Result<Arc<T>, RpcError> {
        let name = url
            .get_method_param(method, key)
            .or_else(|| url.get_param(key))
            .filter(|name| !name.trim().is_empty());
        match name {
            Some(name) => self.get(name.trim()),
            None => self.get_default(),
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.extensions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl<T: ?Sized> Debug for ExtensionLoader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionLoader")
            .field("kind", &self.kind)
            .field("default_name", &self.default_name)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Hi;

    impl Greeter for Hi {
        fn greet(&self) -> String {
            "hi".to_string()
        }
    }

    fn loader() -> ExtensionLoader<dyn Greeter> {
        let loader: ExtensionLoader<dyn Greeter> = ExtensionLoader::new("greeter", "hello");
        loader.register("hello", Arc::new(Hello));
        loader.register("hi", Arc::new(Hi));
        loader
    }

    #[test]
    fn test_get() {
        let loader = loader();
        assert_eq!(loader.get("hi").unwrap().greet(), "hi");
        assert_eq!(loader.get_default().unwrap().greet(), "hello");
        assert_eq!(loader.names(), vec!["hello".to_string(), "hi".to_string()]);
        let err = loader.get("howdy").err().unwrap();
        assert!(err.to_string().contains("howdy"));
    }

    #[test]
    fn test_get_adaptive() {
        let loader = loader();
        let mut url = Url::with_parts("tri", "127.0.0.1", 8888, "a.Greeter");
        assert_eq!(loader.get_adaptive(&url, "say", "greeter").unwrap().greet(), "hello");
        url.set_param("greeter", "hi");
        assert_eq!(loader.get_adaptive(&url, "say", "greeter").unwrap().greet(), "hi");
        url.set_param("say.greeter", "hello");
        assert_eq!(loader.get_adaptive(&url, "say", "greeter").unwrap().greet(), "hello");
        assert_eq!(loader.get_adaptive(&url, "other", "greeter").unwrap().greet(), "hi");
    }
}
