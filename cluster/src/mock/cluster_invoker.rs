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

use dubbo_base::{
    constants::{FORCE_KEY, MOCK_KEY},
    Node, Url,
};
use dubbo_logger::tracing::{debug, warn};
use dubbo_rpc::{BoxInvoker, Invoker, RpcError, RpcInvocation, RpcOutput};

use crate::mock::{context::MockContext, invoker::MockInvoker};

/// Wraps a real invoker and decides per call whether the mock answers instead.
///
/// - no directive, or `false`: the real invoker only
/// - `force...`: the mock only, the real invoker is never contacted
/// - anything else: the real invoker, falling back to the mock on a non-business failure
pub struct MockClusterInvoker {
    inner: BoxInvoker,
    mock: MockInvoker,
}

impl MockClusterInvoker {
    pub fn new(inner: BoxInvoker, context: Arc<MockContext>) -> Self {
        let mock = MockInvoker::new(inner.get_url(), context);
        MockClusterInvoker { inner, mock }
    }

    pub fn inner(&self) -> &BoxInvoker {
        &self.inner
    }

    fn directive(&self, url: &Url, method: &str) -> Option<String> {
        url.get_method_param(method, MOCK_KEY)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .or_else(|| url.get_param(MOCK_KEY).map(|m| m.trim().to_string()))
            .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case("false"))
    }
}

impl Debug for MockClusterInvoker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClusterInvoker")
            .field("inner", &self.inner)
            .finish()
    }
}

impl Node for MockClusterInvoker {
    fn get_url(&self) -> Arc<Url> {
        self.inner.get_url()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn destroy(&self) {
        self.inner.destroy()
    }
}

impl Invoker for MockClusterInvoker {
    fn invoke(&self, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        let url = self.inner.get_url();
        let method = invocation.get_method_name();
        let directive = match self.directive(&url, method) {
            None => return self.inner.invoke(invocation),
            Some(directive) => directive,
        };

        if directive.starts_with(FORCE_KEY) {
            debug!("force-mock: {} called, url: {}", method, url);
            return self.mock.invoke(invocation);
        }

        match self.inner.invoke(invocation) {
            Err(e) if !e.is_biz() => {
                warn!(
                    "fail-mock: {} fail-mock enabled, url: {}, cause: {}",
                    method, url, e
                );
                self.mock.invoke(invocation)
            }
            result => result,
        }
    }
}
