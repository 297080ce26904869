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

use dubbo_base::{constants::DEFAULT_LOADBALANCE, Url};
use dubbo_rpc::{BoxInvoker, RpcInvocation};

use crate::{extension::ExtensionLoader, loadbalance::random::RandomLoadBalance};

pub mod random;
pub mod weight;

pub type BoxLoadBalance = Arc<dyn LoadBalance>;

/// Picks the invoker that serves one call.
///
/// Other policies (round robin, least active, consistent hash) plug in by
/// implementing this trait and registering in [`load_balance_extensions`].
pub trait LoadBalance: Debug + Send + Sync {
    /// Returns `None` only when `invokers` is empty.
    fn select(
        &self,
        invokers: &[BoxInvoker],
        url: Option<&Url>,
        invocation: &RpcInvocation,
    ) -> Option<BoxInvoker>;
}

/// Loader holding the built-in policies, `random` being the default.
pub fn load_balance_extensions() -> ExtensionLoader<dyn LoadBalance> {
    let loader: ExtensionLoader<dyn LoadBalance> =
        ExtensionLoader::new("loadbalance", DEFAULT_LOADBALANCE);
    loader.register(RandomLoadBalance::NAME, Arc::new(RandomLoadBalance::default()));
    loader
}
