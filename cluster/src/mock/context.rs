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

use std::sync::Arc;

use dubbo_base::{
    constants::{MOCK_SUFFIX, PROXY_KEY},
    Url,
};
use dubbo_config::{ClusterConfig, MockConfig};
use dubbo_logger::tracing::debug;
use dubbo_rpc::{BoxInvoker, RpcError, SharedError};

use crate::{
    extension::ExtensionLoader,
    mock::{
        cache::BoundedCache, factory::MockFactories, is_default, value::Materializer,
        value::PojoMaterializer, MOCK_EXCEPTION_MESSAGE,
    },
    proxy::{proxy_factory_extensions, ProxyFactory, ServiceImpl},
};

/// Everything the mock invokers of one configuration scope share.
///
/// Both caches are keyed by the resolved directive string, so one context may
/// serve every service: cached invokers and exceptions hold no per call state.
#[derive(Debug)]
pub struct MockContext {
    factories: Arc<MockFactories>,
    proxy_factories: ExtensionLoader<dyn ProxyFactory>,
    materializer: Arc<dyn Materializer>,
    invokers: BoundedCache<BoxInvoker>,
    throwables: BoundedCache<SharedError>,
}

impl MockContext {
    pub fn new(factories: Arc<MockFactories>) -> Self {
        Self::with_config(factories, &MockConfig::default())
    }

    /// Context sized by the `mock` section of the cluster configuration.
    pub fn from_cluster_config(factories: Arc<MockFactories>, config: &ClusterConfig) -> Self {
        Self::with_config(factories, &config.mock)
    }

    pub fn with_config(factories: Arc<MockFactories>, config: &MockConfig) -> Self {
        MockContext {
            factories,
            proxy_factories: proxy_factory_extensions(),
            materializer: Arc::new(PojoMaterializer),
            invokers: BoundedCache::new("mock invoker", config.invoker_cache_capacity),
            throwables: BoundedCache::new("mock throwable", config.throwable_cache_capacity),
        }
    }

    pub fn with_materializer(mut self, materializer: Arc<dyn Materializer>) -> Self {
        self.materializer = materializer;
        self
    }

    pub fn factories(&self) -> &Arc<MockFactories> {
        &self.factories
    }

    pub fn proxy_factories(&self) -> &ExtensionLoader<dyn ProxyFactory> {
        &self.proxy_factories
    }

    pub fn materializer(&self) -> &dyn Materializer {
        self.materializer.as_ref()
    }

    pub fn invoker_cache(&self) -> &BoundedCache<BoxInvoker> {
        &self.invokers
    }

    pub fn throwable_cache(&self) -> &BoundedCache<SharedError> {
        &self.throwables
    }

    /// The exception named by a `throw` directive, built once per name.
    pub fn get_throwable(&self, throwstr: &str) -> Result<SharedError, RpcError> {
        self.throwables.get_or_try_insert_with(throwstr, || {
            debug!("create mock exception: {}", throwstr);
            self.factories
                .create_exception(throwstr, MOCK_EXCEPTION_MESSAGE)
                .map_err(|e| {
                    RpcError::config_with(format!("mock throw error: {} argument error.", throwstr), e)
                })
        })
    }

    /// The invoker wrapping the implementation named by `mock_service`.
    ///
    /// `default` is resolved to `{interface}Mock` before the cache lookup so
    /// services sharing this context never see each other's implementation.
    pub fn get_invoker(&self, mock_service: &str, url: &Arc<Url>) -> Result<BoxInvoker, RpcError> {
        let interface = url.service_interface();
        let mock_service = resolve_mock_service(mock_service, &interface);
        self.invokers.get_or_try_insert_with(&mock_service, || {
            let mock_object = self.get_mock_object(&mock_service, &interface)?;
            let proxy_factory = match url.get_param(PROXY_KEY) {
                Some(name) => self.proxy_factories.get(&name)?,
                None => self.proxy_factories.get_default()?,
            };
            debug!("create mock invoker: {} for {}", mock_service, interface);
            Ok(proxy_factory.get_invoker(mock_object, &interface, url.clone()))
        })
    }

    /// Instantiates the implementation, `default` meaning `{interface}Mock`.
    pub fn get_mock_object(
        &self,
        mock_service: &str,
        interface: &str,
    ) -> Result<Arc<dyn ServiceImpl>, RpcError> {
        let mock_service = resolve_mock_service(mock_service, interface);
        let mock_object = self.factories.create_service(&mock_service)?;
        if !mock_object.implements(interface) {
            return Err(RpcError::config(format!(
                "the mock class {} not implement interface {}",
                mock_service, interface
            )));
        }
        Ok(mock_object)
    }
}

fn resolve_mock_service(mock_service: &str, interface: &str) -> String {
    if is_default(mock_service) {
        format!("{}{}", interface, MOCK_SUFFIX)
    } else {
        mock_service.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[derive(Default)]
    struct GreeterMock;

    impl ServiceImpl for GreeterMock {
        fn implements(&self, interface: &str) -> bool {
            interface == "org.apache.dubbo.Greeter"
        }

        fn call(&self, _method: &str, _args: &[Value]) -> Result<Value, RpcError> {
            Ok(Value::Null)
        }
    }

    fn context() -> MockContext {
        let factories = MockFactories::new();
        factories.register_service_type::<GreeterMock>("org.apache.dubbo.GreeterMock");
        MockContext::new(Arc::new(factories))
    }

    #[test]
    fn test_default_mock_object() {
        let context = context();
        assert!(context.get_mock_object("default", "org.apache.dubbo.Greeter").is_ok());
        assert!(context.get_mock_object("TRUE", "org.apache.dubbo.Greeter").is_ok());

        let err = context
            .get_mock_object("default", "org.apache.dubbo.Other")
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.to_string(), "mock class org.apache.dubbo.OtherMock not found");
    }

    #[test]
    fn test_non_conforming_mock_object() {
        let context = context();
        let err = context
            .get_mock_object("org.apache.dubbo.GreeterMock", "org.apache.dubbo.Other")
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "the mock class org.apache.dubbo.GreeterMock not implement interface org.apache.dubbo.Other"
        );
    }

    #[test]
    fn test_unknown_proxy_factory() {
        let context = context();
        let mut url = Url::with_parts("tri", "127.0.0.1", 20880, "org.apache.dubbo.Greeter");
        url.set_param("proxy", "javassist");
        assert!(context.get_invoker("default", &Arc::new(url)).is_err());
        assert!(context.invoker_cache().is_empty());
    }

    #[test]
    fn test_capacities_from_config() {
        let config = ClusterConfig::default();
        let context = MockContext::from_cluster_config(Arc::new(MockFactories::new()), &config);
        assert_eq!(context.invoker_cache().capacity(), 10000);
        assert_eq!(context.throwable_cache().capacity(), 1000);
    }
}
