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

use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use dubbo_base::{constants::DEFAULT_PROXY, Node, Url};
use dubbo_rpc::{BaseInvoker, BoxInvoker, Invoker, RpcError, RpcInvocation, RpcOutput};
use serde_json::Value;

use crate::extension::ExtensionLoader;

/// A local implementation of a service interface.
pub trait ServiceImpl: Send + Sync {
    /// Whether this implementation satisfies the contract of `interface`.
    fn implements(&self, interface: &str) -> bool;

    fn call(&self, method: &str, args: &[Value]) -> Result<Value, RpcError>;
}

/// Turns a local implementation into an invoker.
pub trait ProxyFactory: Debug + Send + Sync {
    fn get_invoker(&self, target: Arc<dyn ServiceImpl>, interface: &str, url: Arc<Url>) -> BoxInvoker;
}

#[derive(Debug, Default, Clone)]
pub struct DefaultProxyFactory;

impl ProxyFactory for DefaultProxyFactory {
    fn get_invoker(&self, target: Arc<dyn ServiceImpl>, interface: &str, url: Arc<Url>) -> BoxInvoker {
        Arc::new(ProxyInvoker::new(target, interface, url))
    }
}

/// Loader holding the built-in proxy factories, `default` being the default.
pub fn proxy_factory_extensions() -> ExtensionLoader<dyn ProxyFactory> {
    let loader: ExtensionLoader<dyn ProxyFactory> = ExtensionLoader::new("proxy", DEFAULT_PROXY);
    loader.register(DEFAULT_PROXY, Arc::new(DefaultProxyFactory));
    loader
}

/// Dispatches invocations by method name to a local implementation.
pub struct ProxyInvoker {
    base: BaseInvoker,
    interface: String,
    target: Arc<dyn ServiceImpl>,
}

impl ProxyInvoker {
    pub fn new(target: Arc<dyn ServiceImpl>, interface: &str, url: Arc<Url>) -> Self {
        ProxyInvoker {
            base: BaseInvoker::from_arc(url),
            interface: interface.to_string(),
            target,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl Debug for ProxyInvoker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyInvoker")
            .field("interface", &self.interface)
            .field("url", &self.base.get_url().short_url())
            .finish()
    }
}

impl Node for ProxyInvoker {
    fn get_url(&self) -> Arc<Url> {
        self.base.get_url()
    }

    fn is_available(&self) -> bool {
        self.base.is_available()
    }

    fn destroy(&self) {
        self.base.destroy()
    }
}

impl Invoker for ProxyInvoker {
    fn invoke(&self, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        if self.base.is_destroyed() {
            return Err(RpcError::Unknown(format!(
                "invoker for {} is destroyed, method: {}",
                self.interface,
                invocation.get_method_name()
            )));
        }
        self.target
            .call(invocation.get_method_name(), invocation.arguments())
            .map(RpcOutput::new)
    }
}
