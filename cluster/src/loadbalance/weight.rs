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
    fmt::Debug,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use dubbo_base::constants::{DEFAULT_WARMUP, DEFAULT_WEIGHT, TIMESTAMP_KEY, WARMUP_KEY, WEIGHT_KEY};
use dubbo_rpc::{Invoker, RpcInvocation};

/// Computes the weight of one candidate for one call.
///
/// Weights may depend on time, so they are asked for on every selection and
/// never cached.
pub trait WeightResolver: Debug + Send + Sync {
    fn weight(&self, invoker: &dyn Invoker, invocation: &RpcInvocation) -> u32;
}

/// Weight configured on the url, `{method}.weight` before `weight`, default 100.
pub fn configured_weight(invoker: &dyn Invoker, invocation: &RpcInvocation) -> u32 {
    invoker
        .get_url()
        .get_method_param_as::<i64>(invocation.get_method_name(), WEIGHT_KEY)
        .unwrap_or(DEFAULT_WEIGHT as i64)
        .clamp(0, u32::MAX as i64) as u32
}

/// Uses the configured weight as is.
#[derive(Debug, Default, Clone)]
pub struct StaticWeightResolver;

impl WeightResolver for StaticWeightResolver {
    fn weight(&self, invoker: &dyn Invoker, invocation: &RpcInvocation) -> u32 {
        configured_weight(invoker, invocation)
    }
}

pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Ramps the weight of a freshly started provider up to its configured value.
///
/// A provider announces its start time in the `timestamp` param (epoch
/// millis). While its uptime is below `warmup` (default ten minutes) the
/// weight grows linearly with uptime, never below 1 and never above the
/// configured weight.
#[derive(Clone)]
pub struct WarmupWeightResolver {
    clock: Clock,
}

impl WarmupWeightResolver {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(now_millis))
    }

    pub fn with_clock(clock: Clock) -> Self {
        WarmupWeightResolver { clock }
    }
}

impl Default for WarmupWeightResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for WarmupWeightResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarmupWeightResolver").finish_non_exhaustive()
    }
}

impl WeightResolver for WarmupWeightResolver {
    fn weight(&self, invoker: &dyn Invoker, invocation: &RpcInvocation) -> u32 {
        let weight = configured_weight(invoker, invocation);
        if weight == 0 {
            return weight;
        }
        let url = invoker.get_url();
        let timestamp = match url.get_param_as::<u64>(TIMESTAMP_KEY) {
            Some(ts) if ts > 0 => ts,
            _ => return weight,
        };
        // a start time in the future means no ramp
        let uptime = (self.clock)().saturating_sub(timestamp);
        let warmup = url.get_param_as::<u64>(WARMUP_KEY).unwrap_or(DEFAULT_WARMUP);
        if uptime > 0 && uptime < warmup {
            warmup_weight(uptime, warmup, weight)
        } else {
            weight
        }
    }
}

fn warmup_weight(uptime: u64, warmup: u64, weight: u32) -> u32 {
    let ww = (uptime as u128 * weight as u128 / warmup as u128) as u64;
    ww.clamp(1, weight as u64) as u32
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use dubbo_base::Url;

    use super::*;
    use crate::loadbalance::test_support::{invocation, weighted_invokers, IndexedInvoker};

    fn invoker_with(params: &[(&str, &str)]) -> IndexedInvoker {
        let mut url = Url::with_parts("tri", "127.0.0.1", 20880, "org.apache.dubbo.Greeter");
        for (k, v) in params {
            url.set_param(k, v);
        }
        IndexedInvoker::new(0, url)
    }

    fn fixed_clock(now: u64) -> WarmupWeightResolver {
        WarmupWeightResolver::with_clock(Arc::new(move || now))
    }

    #[test]
    fn test_configured_weight() {
        let invokers = weighted_invokers(&[None, Some(7), Some(-3)]);
        let inv = invocation();
        assert_eq!(configured_weight(invokers[0].as_ref(), &inv), 100);
        assert_eq!(configured_weight(invokers[1].as_ref(), &inv), 7);
        assert_eq!(configured_weight(invokers[2].as_ref(), &inv), 0);
    }

    #[test]
    fn test_method_weight_first() {
        let invoker = invoker_with(&[("weight", "10"), ("sayHello.weight", "3")]);
        assert_eq!(StaticWeightResolver.weight(&invoker, &invocation()), 3);
    }

    #[test]
    fn test_no_timestamp_no_warmup() {
        let invoker = invoker_with(&[("weight", "100")]);
        assert_eq!(fixed_clock(1_000).weight(&invoker, &invocation()), 100);
    }

    #[test]
    fn test_warmup_ramp() {
        let invoker = invoker_with(&[("weight", "100"), ("timestamp", "1000"), ("warmup", "10000")]);
        let inv = invocation();
        assert_eq!(fixed_clock(1_001).weight(&invoker, &inv), 1);
        assert_eq!(fixed_clock(3_500).weight(&invoker, &inv), 25);
        assert_eq!(fixed_clock(6_000).weight(&invoker, &inv), 50);
        assert_eq!(fixed_clock(10_999).weight(&invoker, &inv), 99);
        assert_eq!(fixed_clock(11_000).weight(&invoker, &inv), 100);
        assert_eq!(fixed_clock(500_000).weight(&invoker, &inv), 100);
    }

    #[test]
    fn test_warmup_is_monotonic() {
        let invoker = invoker_with(&[("weight", "37"), ("timestamp", "1"), ("warmup", "997")]);
        let inv = invocation();
        let mut last = 0;
        for now in 2..2_000 {
            let w = fixed_clock(now).weight(&invoker, &inv);
            assert!(w >= last);
            assert!(w <= 37);
            last = w;
        }
        assert_eq!(last, 37);
    }

    #[test]
    fn test_future_timestamp_uses_full_weight() {
        let invoker = invoker_with(&[("weight", "40"), ("timestamp", "9000")]);
        assert_eq!(fixed_clock(1_000).weight(&invoker, &invocation()), 40);
    }

    #[test]
    fn test_zero_weight_stays_zero() {
        let invoker = invoker_with(&[("weight", "0"), ("timestamp", "1000")]);
        assert_eq!(fixed_clock(2_000).weight(&invoker, &invocation()), 0);
    }
}
