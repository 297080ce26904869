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

pub type AttachmentsMap = HashMap<String, String>;

/// Successful outcome of an invocation. Failures travel as [`crate::RpcError`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcOutput {
    value: Value,
    attachments: AttachmentsMap,
}

impl RpcOutput {
    pub fn new(value: Value) -> Self {
        RpcOutput {
            value,
            attachments: AttachmentsMap::new(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn set_attachments(&mut self, attachments: AttachmentsMap) {
        self.attachments = attachments;
    }

    pub fn add_attachment(&mut self, key: &str, value: &str) {
        self.attachments.insert(key.to_string(), value.to_string());
    }

    pub fn get_attachment_or_default(&self, key: &str, default_value: &str) -> String {
        self.attachments
            .get(key)
            .cloned()
            .unwrap_or_else(|| default_value.to_string())
    }
}
