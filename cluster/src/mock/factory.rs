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

use dashmap::DashMap;
use dubbo_base::StdError;
use dubbo_rpc::{RpcError, SharedError};

use crate::proxy::ServiceImpl;

/// No-argument constructor of a mock implementation.
pub type ServiceConstructor = Arc<dyn Fn() -> Result<Arc<dyn ServiceImpl>, StdError> + Send + Sync>;

/// Single message argument constructor of an exception.
pub type ExceptionConstructor = Arc<dyn Fn(&str) -> Result<SharedError, StdError> + Send + Sync>;

/// Name to constructor registries supplied by the host application.
///
/// Mock directives refer to implementations and exceptions by name, e.g.
/// `throw com.foo.BizError` or `com.foo.GreeterMock`.
#[derive(Default)]
pub struct MockFactories {
    services: DashMap<String, ServiceConstructor>,
    exceptions: DashMap<String, ExceptionConstructor>,
}

impl MockFactories {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register_service<F>(&self, name: &str, constructor: F)
    where
        F: Fn() -> Result<Arc<dyn ServiceImpl>, StdError> + Send + Sync + 'static,
    {
        self.services.insert(name.to_string(), Arc::new(constructor));
    }

    /// Registers `S::default` as the constructor of `name`.
    pub fn register_service_type<S>(&self, name: &str)
    where
        S: ServiceImpl + Default + 'static,
    {
        self.register_service(name, || Ok(Arc::new(S::default()) as Arc<dyn ServiceImpl>));
    }

    pub fn register_exception<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&str) -> Result<SharedError, StdError> + Send + Sync + 'static,
    {
        self.exceptions.insert(name.to_string(), Arc::new(constructor));
    }

    /// Registers `E::from(message)` as the constructor of `name`.
    pub fn register_exception_type<E>(&self, name: &str)
    where
        E: std::error::Error + From<String> + Send + Sync + 'static,
    {
        self.register_exception(name, |message| {
            Ok(Arc::new(E::from(message.to_string())) as SharedError)
        });
    }

    pub fn create_service(&self, name: &str) -> Result<Arc<dyn ServiceImpl>, RpcError> {
        // clone the constructor out so no shard lock is held while it runs
        let constructor = self
            .services
            .get(name)
            .map(|c| c.value().clone())
            .ok_or_else(|| RpcError::config(format!("mock class {} not found", name)))?;
        constructor().map_err(|e| {
            RpcError::config_with(format!("no default constructor from mock class {}", name), e)
        })
    }

    pub fn create_exception(&self, name: &str, message: &str) -> Result<SharedError, RpcError> {
        let constructor = self
            .exceptions
            .get(name)
            .map(|c| c.value().clone())
            .ok_or_else(|| RpcError::config(format!("exception class {} not found", name)))?;
        constructor(message).map_err(|e| {
            RpcError::config_with(format!("failed to instantiate exception class {}", name), e)
        })
    }
}

impl Debug for MockFactories {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFactories")
            .field("services", &self.services.len())
            .field("exceptions", &self.exceptions.len())
            .finish()
    }
}
