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

use dubbo_rpc::{RpcError, ValueType};
use serde_json::{Map, Number, Value};

/// Converts a generic value into the shape of a declared type.
pub trait Materializer: Debug + Send + Sync {
    fn realize(&self, value: Value, target: &ValueType) -> Result<Value, RpcError>;
}

/// Structural conversion between json values, element by element.
#[derive(Debug, Default, Clone)]
pub struct PojoMaterializer;

impl Materializer for PojoMaterializer {
    fn realize(&self, value: Value, target: &ValueType) -> Result<Value, RpcError> {
        match (target, value) {
            (_, Value::Null) => Ok(Value::Null),
            (ValueType::Any, value) => Ok(value),

            (ValueType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
            (ValueType::Bool, Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            (ValueType::Bool, Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),

            (ValueType::Int, Value::Number(n)) => to_int(&n).ok_or_else(|| cannot_realize(&Value::Number(n), target)),
            (ValueType::Int, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| cannot_realize(&Value::String(s), target)),

            (ValueType::Float, Value::Number(n)) => n
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| cannot_realize(&Value::Number(n), target)),
            (ValueType::Float, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| cannot_realize(&Value::String(s), target)),

            (ValueType::String, Value::String(s)) => Ok(Value::String(s)),
            (ValueType::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (ValueType::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

            (ValueType::List(elem), Value::Array(items)) => items
                .into_iter()
                .map(|item| self.realize(item, elem))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),

            (ValueType::Map(value_type), Value::Object(entries)) => entries
                .into_iter()
                .map(|(k, v)| self.realize(v, value_type).map(|v| (k, v)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),

            (ValueType::Object(_), Value::Object(entries)) => Ok(Value::Object(entries)),

            (_, value) => Err(cannot_realize(&value, target)),
        }
    }
}

fn to_int(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

fn cannot_realize(value: &Value, target: &ValueType) -> RpcError {
    RpcError::coercion(format!("can not realize {} as {}", value, target))
}

/// Digits, optionally with one inner decimal point.
fn is_numeric(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let int_part = parts.next().unwrap_or_default();
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    match parts.next() {
        None => all_digits(int_part),
        Some(fraction) => all_digits(int_part) && all_digits(fraction),
    }
}

fn parse_number(s: &str) -> Result<Value, RpcError> {
    if !s.contains('.') {
        if let Ok(n) = s.parse::<u64>() {
            return Ok(Value::from(n));
        }
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| RpcError::coercion(format!("invalid number: {}", s)))
}

/// Turns a configured literal into a value of the declared return type.
///
/// Without a declared type the literal keeps its natural json shape.
pub fn parse_mock_value(
    mock: &str,
    return_type: Option<&ValueType>,
    materializer: &dyn Materializer,
) -> Result<Value, RpcError> {
    let mock = mock.trim();
    let value = if mock == "empty" {
        return_type.map(ValueType::empty_value).unwrap_or(Value::Null)
    } else if mock == "null" {
        Value::Null
    } else if mock == "true" {
        Value::Bool(true)
    } else if mock == "false" {
        Value::Bool(false)
    } else if mock.len() >= 2
        && ((mock.starts_with('"') && mock.ends_with('"'))
            || (mock.starts_with('\'') && mock.ends_with('\'')))
    {
        Value::String(mock[1..mock.len() - 1].to_string())
    } else if return_type.map_or(false, ValueType::is_string) {
        Value::String(mock.to_string())
    } else if is_numeric(mock) {
        parse_number(mock)?
    } else if mock.starts_with('{') {
        let map: Map<String, Value> = serde_json::from_str(mock)
            .map_err(|e| RpcError::coercion_with(format!("invalid json object: {}", mock), e))?;
        Value::Object(map)
    } else if mock.starts_with('[') {
        let list: Vec<Value> = serde_json::from_str(mock)
            .map_err(|e| RpcError::coercion_with(format!("invalid json array: {}", mock), e))?;
        Value::Array(list)
    } else {
        Value::String(mock.to_string())
    };

    match return_type {
        Some(target) => materializer.realize(value, target),
        None => Ok(value),
    }
}
