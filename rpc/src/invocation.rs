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

use std::collections::HashMap;

use serde_json::Value;

use crate::types::ValueType;

/// One call: target service, method, arguments and attachments.
///
/// Built once by the caller and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct RpcInvocation {
    target_service_unique_name: String,
    method_name: String,
    parameter_types: Vec<ValueType>,
    arguments: Vec<Value>,
    return_type: Option<ValueType>,
    attachments: HashMap<String, String>,
}

impl RpcInvocation {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_service_unique_name(mut self, service_unique_name: String) -> Self {
        self.target_service_unique_name = service_unique_name;
        self
    }

    pub fn with_method_name(mut self, method_name: String) -> Self {
        self.method_name = method_name;
        self
    }

    pub fn with_arguments(mut self, parameter_types: Vec<ValueType>, arguments: Vec<Value>) -> Self {
        self.parameter_types = parameter_types;
        self.arguments = arguments;
        self
    }

    pub fn with_return_type(mut self, return_type: ValueType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_attachment(mut self, key: &str, value: &str) -> Self {
        self.attachments.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get_target_service_unique_name(&self) -> &str {
        &self.target_service_unique_name
    }

    pub fn get_method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameter_types(&self) -> &[ValueType] {
        &self.parameter_types
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Declared return type, `None` when the caller did not declare one.
    pub fn return_type(&self) -> Option<&ValueType> {
        self.return_type.as_ref()
    }

    pub fn get_attachment(&self, key: &str) -> Option<&str> {
        self.attachments.get(key).map(String::as_str)
    }

    pub fn attachments(&self) -> &HashMap<String, String> {
        &self.attachments
    }

    pub fn unique_fingerprint(&self) -> String {
        format!("{}#{}", self.target_service_unique_name, self.method_name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder() {
        let invocation = RpcInvocation::new()
            .with_service_unique_name("org.apache.dubbo.Greeter".to_string())
            .with_method_name("sayHello".to_string())
            .with_arguments(vec![ValueType::String], vec![json!("dubbo")])
            .with_return_type(ValueType::String)
            .with_attachment("trace-id", "42");
        assert_eq!(invocation.get_method_name(), "sayHello");
        assert_eq!(invocation.arguments(), &[json!("dubbo")]);
        assert_eq!(invocation.return_type(), Some(&ValueType::String));
        assert_eq!(invocation.get_attachment("trace-id"), Some("42"));
        assert_eq!(
            invocation.unique_fingerprint(),
            "org.apache.dubbo.Greeter#sayHello"
        );
    }
}
