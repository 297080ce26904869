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

use std::fmt::Debug;

use dubbo_rpc::{BoxInvoker, RpcInvocation};

/// Source of the invokers currently able to serve a service.
pub trait Directory: Debug + Send + Sync {
    fn list(&self, invocation: &RpcInvocation) -> Vec<BoxInvoker>;
}

/// A fixed list of invokers, e.g. from a direct-connect url.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    invokers: Vec<BoxInvoker>,
}

impl StaticDirectory {
    pub fn new(invokers: Vec<BoxInvoker>) -> Self {
        StaticDirectory { invokers }
    }
}

impl Directory for StaticDirectory {
    fn list(&self, _invocation: &RpcInvocation) -> Vec<BoxInvoker> {
        self.invokers.clone()
    }
}
