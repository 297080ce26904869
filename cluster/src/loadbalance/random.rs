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

use std::sync::{Arc, Mutex, PoisonError};

use dubbo_base::Url;
use dubbo_logger::tracing::trace;
use dubbo_rpc::{BoxInvoker, RpcInvocation};
use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};

use crate::loadbalance::{
    weight::{WarmupWeightResolver, WeightResolver},
    LoadBalance,
};

/// Where the random draws come from.
#[derive(Debug)]
enum RandomSource {
    /// Per thread generator, no contention between callers.
    Thread,
    /// One shared seeded generator, reproducible draws.
    Seeded(Mutex<StdRng>),
}

impl RandomSource {
    // bound must be positive
    fn next_below(&self, bound: u64) -> u64 {
        match self {
            RandomSource::Thread => thread_rng().gen_range(0..bound),
            RandomSource::Seeded(rng) => rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .gen_range(0..bound),
        }
    }
}

/// Weighted random selection.
///
/// When the candidates carry different weights, candidate `i` is chosen with
/// probability `weight_i / total_weight`. When all weights are equal, or all
/// are zero, every candidate is equally likely.
#[derive(Debug)]
pub struct RandomLoadBalance {
    weight_resolver: Arc<dyn WeightResolver>,
    random: RandomSource,
}

impl RandomLoadBalance {
    pub const NAME: &'static str = "random";

    pub fn new(weight_resolver: Arc<dyn WeightResolver>) -> Self {
        RandomLoadBalance {
            weight_resolver,
            random: RandomSource::Thread,
        }
    }

    /// Draws from one shared generator seeded with `seed`.
    pub fn with_seed(weight_resolver: Arc<dyn WeightResolver>, seed: u64) -> Self {
        RandomLoadBalance {
            weight_resolver,
            random: RandomSource::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl Default for RandomLoadBalance {
    fn default() -> Self {
        Self::new(Arc::new(WarmupWeightResolver::new()))
    }
}

impl LoadBalance for RandomLoadBalance {
    fn select(
        &self,
        invokers: &[BoxInvoker],
        _url: Option<&Url>,
        invocation: &RpcInvocation,
    ) -> Option<BoxInvoker> {
        match invokers.len() {
            0 => return None,
            1 => return invokers.first().cloned(),
            _ => {}
        }

        let weights: Vec<u32> = invokers
            .iter()
            .map(|invoker| self.weight_resolver.weight(invoker.as_ref(), invocation))
            .collect();
        let total_weight: u64 = weights.iter().map(|w| *w as u64).sum();
        let same_weight = weights.windows(2).all(|pair| pair[0] == pair[1]);
        trace!(
            "random select, weights: {:?}, total: {}, same: {}",
            weights,
            total_weight,
            same_weight
        );

        if total_weight > 0 && !same_weight {
            let mut offset = self.random.next_below(total_weight) as i64;
            for (invoker, weight) in invokers.iter().zip(weights.iter()) {
                offset -= *weight as i64;
                if offset < 0 {
                    return Some(invoker.clone());
                }
            }
        }

        let index = self.random.next_below(invokers.len() as u64) as usize;
        invokers.get(index).cloned()
    }
}
