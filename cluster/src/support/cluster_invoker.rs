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

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use dubbo_base::{constants::LOADBALANCE_KEY, Node, Url};
use dubbo_config::ClusterConfig;
use dubbo_logger::tracing::debug;
use dubbo_rpc::{BoxInvoker, Invoker, RpcError, RpcInvocation, RpcOutput};

use crate::{
    extension::ExtensionLoader,
    loadbalance::{load_balance_extensions, LoadBalance},
    support::directory::Directory,
};

/// Lists the invokers of a directory and lets the configured load balance pick one per call.
#[derive(Debug)]
pub struct ClusterInvoker {
    url: Arc<Url>,
    directory: Arc<dyn Directory>,
    loadbalances: ExtensionLoader<dyn LoadBalance>,
    destroyed: AtomicBool,
}

impl ClusterInvoker {
    pub fn new(url: Url, directory: Arc<dyn Directory>) -> Self {
        Self::with_loadbalances(url, directory, load_balance_extensions())
    }

    /// Falls back to `cluster.loadbalance` when the url names no policy.
    pub fn from_cluster_config(url: Url, directory: Arc<dyn Directory>, config: &ClusterConfig) -> Self {
        let loadbalances = load_balance_extensions().with_default_name(&config.loadbalance);
        Self::with_loadbalances(url, directory, loadbalances)
    }

    pub fn with_loadbalances(
        url: Url,
        directory: Arc<dyn Directory>,
        loadbalances: ExtensionLoader<dyn LoadBalance>,
    ) -> Self {
        ClusterInvoker {
            url: Arc::new(url),
            directory,
            loadbalances,
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn directory(&self) -> &Arc<dyn Directory> {
        &self.directory
    }

    pub fn loadbalances(&self) -> &ExtensionLoader<dyn LoadBalance> {
        &self.loadbalances
    }

    fn select(&self, invocation: &RpcInvocation) -> Result<Option<BoxInvoker>, RpcError> {
        let invokers: Vec<BoxInvoker> = self
            .directory
            .list(invocation)
            .into_iter()
            .filter(|invoker| invoker.is_available())
            .collect();
        if invokers.len() <= 1 {
            return Ok(invokers.into_iter().next());
        }
        let loadbalance = self.loadbalances.get_adaptive(
            &self.url,
            invocation.get_method_name(),
            LOADBALANCE_KEY,
        )?;
        Ok(loadbalance.select(&invokers, Some(&self.url), invocation))
    }
}

impl Node for ClusterInvoker {
    fn get_url(&self) -> Arc<Url> {
        self.url.clone()
    }

    fn is_available(&self) -> bool {
        !self.destroyed.load(Ordering::SeqCst)
            && self
                .directory
                .list(&RpcInvocation::new())
                .iter()
                .any(|invoker| invoker.is_available())
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }
}

impl Invoker for ClusterInvoker {
    fn invoke(&self, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(RpcError::Unknown(format!(
                "cluster invoker for {} is destroyed",
                self.url.service_interface()
            )));
        }
        let invoker = self.select(invocation)?.ok_or_else(|| {
            RpcError::Unknown(format!(
                "No provider available for the service {}, method: {}",
                self.url.service_interface(),
                invocation.get_method_name()
            ))
        })?;
        debug!("cluster selected invoker: {}", invoker.get_url().short_url());
        invoker.invoke(invocation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;
    use crate::{
        loadbalance::test_support::{invocation, weighted_invokers, IndexedInvoker},
        support::directory::StaticDirectory,
    };

    fn consumer_url() -> Url {
        Url::with_parts("consumer", "127.0.0.1", 0, "org.apache.dubbo.Greeter")
    }

    #[test]
    fn test_single_provider() {
        let directory = Arc::new(StaticDirectory::new(weighted_invokers(&[None])));
        let invoker = ClusterInvoker::new(consumer_url(), directory);
        assert_eq!(invoker.invoke(&invocation()).unwrap().value(), &json!(0));
    }

    #[test]
    fn test_no_provider() {
        let invoker = ClusterInvoker::new(consumer_url(), Arc::new(StaticDirectory::default()));
        let err = invoker.invoke(&invocation()).unwrap_err();
        assert!(err.to_string().starts_with("No provider available"));
        assert!(!invoker.is_available());
    }

    #[test]
    fn test_unavailable_providers_are_skipped() {
        let invokers = weighted_invokers(&[None, None, None]);
        invokers[0].destroy();
        invokers[2].destroy();
        let invoker = ClusterInvoker::new(consumer_url(), Arc::new(StaticDirectory::new(invokers)));
        for _ in 0..20 {
            assert_eq!(invoker.invoke(&invocation()).unwrap().value(), &json!(1));
        }
    }

    #[test]
    fn test_zero_weight_provider_never_selected() {
        let invokers = weighted_invokers(&[Some(0), Some(100)]);
        let invoker = ClusterInvoker::new(consumer_url(), Arc::new(StaticDirectory::new(invokers)));
        for _ in 0..200 {
            assert_eq!(invoker.invoke(&invocation()).unwrap().value(), &json!(1));
        }
    }

    #[test]
    fn test_unknown_loadbalance() {
        let mut url = consumer_url();
        url.set_param("loadbalance", "roundrobin");
        let directory = Arc::new(StaticDirectory::new(weighted_invokers(&[None, None])));
        let invoker = ClusterInvoker::new(url, directory);
        assert!(matches!(invoker.invoke(&invocation()), Err(RpcError::Config { .. })));

        let config = ClusterConfig {
            loadbalance: "roundrobin".to_string(),
            ..ClusterConfig::default()
        };
        let directory = Arc::new(StaticDirectory::new(weighted_invokers(&[None, None])));
        let invoker = ClusterInvoker::from_cluster_config(consumer_url(), directory, &config);
        assert!(invoker.invoke(&invocation()).is_err());
    }

    #[test]
    fn test_destroyed() {
        let indexed = Arc::new(IndexedInvoker::new(0, consumer_url()));
        let directory = Arc::new(StaticDirectory::new(vec![indexed.clone() as BoxInvoker]));
        let invoker = ClusterInvoker::new(consumer_url(), directory);
        assert!(invoker.is_available());
        invoker.destroy();
        assert!(!invoker.is_available());
        assert!(invoker.invoke(&invocation()).is_err());
        assert_eq!(indexed.calls.load(Ordering::SeqCst), 0);
    }
}
