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
    constants::{MOCK_KEY, RETURN_KEY, THROW_KEY},
    Node, Url,
};
use dubbo_logger::tracing::{debug, error};
use dubbo_rpc::{Invoker, RpcError, RpcInvocation, RpcOutput};

use crate::mock::{context::MockContext, normalize_mock, parse_mock_value, MOCK_EXCEPTION_MESSAGE};

/// Answers a call from its mock directive without touching a provider.
///
/// A directive is one of:
///
/// - `return <literal>`: the literal converted to the declared return type
/// - `throw` or `throw <ExceptionName>`: a degradation or business error
/// - anything else: the name of a local implementation to delegate to
pub struct MockInvoker {
    url: Arc<Url>,
    context: Arc<MockContext>,
}

impl MockInvoker {
    pub fn new(url: Arc<Url>, context: Arc<MockContext>) -> Self {
        MockInvoker { url, context }
    }

    pub fn context(&self) -> &Arc<MockContext> {
        &self.context
    }

    /// Mock invokers are not bound to a declared service type.
    pub fn service_type(&self) -> Option<&str> {
        None
    }

    fn directive(&self, method: &str) -> Option<String> {
        self.url
            .get_method_param(method, MOCK_KEY)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.url.get_param(MOCK_KEY))
            .filter(|m| !m.trim().is_empty())
    }

    fn invoke_return(&self, body: &str, mock: &str, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        parse_mock_value(body, invocation.return_type(), self.context.materializer())
            .map(RpcOutput::new)
            .map_err(|e| {
                RpcError::coercion_with(
                    format!(
                        "mock return invoke error. method: {}, mock: {}, url: {}",
                        invocation.get_method_name(),
                        mock,
                        self.url
                    ),
                    e,
                )
            })
    }

    fn invoke_throw(&self, body: &str) -> RpcError {
        if body.is_empty() {
            return RpcError::Degraded(MOCK_EXCEPTION_MESSAGE.to_string());
        }
        match self.context.get_throwable(body) {
            Ok(throwable) => RpcError::Biz(throwable),
            Err(e) => e,
        }
    }

    fn invoke_delegate(&self, mock: &str, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        let invoker = self.context.get_invoker(mock, &self.url).map_err(|e| {
            error!("failed to create mock implementation class {}: {}", mock, e);
            RpcError::config_with(format!("failed to create mock implementation class {}", mock), e)
        })?;
        invoker.invoke(invocation)
    }
}

/// The text after `keyword` when `mock` starts with it, an optional `:` stripped.
fn directive_body<'a>(mock: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = mock.strip_prefix(keyword)?.trim_start();
    Some(rest.strip_prefix(':').unwrap_or(rest).trim())
}

impl Debug for MockInvoker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockInvoker")
            .field("url", &self.url.short_url())
            .finish()
    }
}

impl Node for MockInvoker {
    fn get_url(&self) -> Arc<Url> {
        self.url.clone()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn destroy(&self) {}
}

impl Invoker for MockInvoker {
    fn invoke(&self, invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        let method = invocation.get_method_name();
        let raw = self.directive(method).ok_or_else(|| {
            RpcError::config(format!("mock can not be null. url: {}", self.url))
        })?;

        let mock = normalize_mock(&Url::decode_value(&raw));
        if mock.is_empty() {
            return Err(RpcError::config(format!("mock can not be null. url: {}", self.url)));
        }
        debug!("mock invoke, method: {}, mock: {}", method, mock);

        if let Some(body) = directive_body(&mock, RETURN_KEY) {
            self.invoke_return(body, &mock, invocation)
        } else if let Some(body) = directive_body(&mock, THROW_KEY) {
            Err(self.invoke_throw(body))
        } else {
            self.invoke_delegate(&mock, invocation)
        }
    }
}
