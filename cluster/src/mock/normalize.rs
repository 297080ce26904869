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

use dubbo_base::constants::{
    DEFAULT_KEY, FAIL_KEY, FAIL_PREFIX, FORCE_KEY, FORCE_PREFIX, RETURN_KEY, THROW_KEY,
};

/// Whether the directive names the default mock implementation.
pub fn is_default(mock: &str) -> bool {
    mock.eq_ignore_ascii_case(DEFAULT_KEY) || mock.eq_ignore_ascii_case("true")
}

/// Normalizes a mock directive:
///
/// - `return` => `return null`
/// - `default`, `true`, `fail`, `force` => `default`
/// - `fail:throw/return foo`, `force:throw/return foo` => `throw/return foo`
/// - backticks in `return`/`throw` directives become double quotes
pub fn normalize_mock(mock: &str) -> String {
    let mock = mock.trim();
    if mock.is_empty() {
        return String::new();
    }

    if mock.eq_ignore_ascii_case(RETURN_KEY) {
        return format!("{} null", RETURN_KEY);
    }

    if is_default(mock) || mock.eq_ignore_ascii_case(FAIL_KEY) || mock.eq_ignore_ascii_case(FORCE_KEY) {
        return DEFAULT_KEY.to_string();
    }

    let mut mock = mock;
    if let Some(rest) = mock.strip_prefix(FAIL_PREFIX) {
        mock = rest.trim();
    }
    if let Some(rest) = mock.strip_prefix(FORCE_PREFIX) {
        mock = rest.trim();
    }

    if mock.starts_with(RETURN_KEY) || mock.starts_with(THROW_KEY) {
        mock.replace('`', "\"")
    } else {
        mock.to_string()
    }
}
