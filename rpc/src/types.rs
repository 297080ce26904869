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

use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};

/// Declared type of a method parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    /// Ordered sequence of the element type.
    List(Box<ValueType>),
    /// String keyed mapping to the value type.
    Map(Box<ValueType>),
    /// Named structure, carried as a json object.
    Object(String),
    Any,
}

impl ValueType {
    pub fn list_of(elem: ValueType) -> Self {
        ValueType::List(Box::new(elem))
    }

    pub fn map_of(value: ValueType) -> Self {
        ValueType::Map(Box::new(value))
    }

    /// The canonical empty instance of this type.
    pub fn empty_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::from(0),
            ValueType::Float => Value::from(0.0),
            ValueType::String => Value::String(String::new()),
            ValueType::List(_) => Value::Array(Vec::new()),
            ValueType::Map(_) | ValueType::Object(_) => Value::Object(Map::new()),
            ValueType::Any => Value::Null,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int => f.write_str("int"),
            ValueType::Float => f.write_str("float"),
            ValueType::String => f.write_str("string"),
            ValueType::List(elem) => write!(f, "list<{}>", elem),
            ValueType::Map(value) => write!(f, "map<string, {}>", value),
            ValueType::Object(name) => f.write_str(name),
            ValueType::Any => f.write_str("any"),
        }
    }
}
