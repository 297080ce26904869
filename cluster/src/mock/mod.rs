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

//! Service degradation: answer a call locally with a fixed value, a fixed
//! error or an alternate implementation instead of going to the network.
//!
//! Directives are read from the `{method}.mock` or `mock` url param, e.g.
//! `force:return null`, `fail:throw com.foo.BizError`, `default`.

pub mod cache;
pub mod cluster_invoker;
pub mod context;
pub mod factory;
pub mod invoker;
pub mod normalize;
pub mod value;

/// Message of every exception synthesized by a `throw` directive.
pub const MOCK_EXCEPTION_MESSAGE: &str = "mocked exception for service degradation.";

pub use normalize::{is_default, normalize_mock};
pub use value::{parse_mock_value, Materializer, PojoMaterializer};
