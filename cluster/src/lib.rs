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

//! Consumer side decision layer: which replica serves a call, and whether
//! the call reaches the network at all.

pub mod extension;
pub mod loadbalance;
pub mod mock;
pub mod proxy;
pub mod support;

pub use extension::ExtensionLoader;
pub use loadbalance::{
    random::RandomLoadBalance,
    weight::{StaticWeightResolver, WarmupWeightResolver, WeightResolver},
    LoadBalance,
};
pub use mock::{
    cluster_invoker::MockClusterInvoker, context::MockContext, factory::MockFactories,
    invoker::MockInvoker,
};
pub use proxy::{DefaultProxyFactory, ProxyFactory, ProxyInvoker, ServiceImpl};
pub use support::{
    cluster_invoker::ClusterInvoker,
    directory::{Directory, StaticDirectory},
};
