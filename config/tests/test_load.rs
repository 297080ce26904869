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

#[cfg(test)]
mod tests_load {
    use std::path::PathBuf;

    use anyhow::Error;
    use dubbo_config::RootConfig;

    fn test_file() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("dubbo.yaml")
    }

    #[test]
    fn test_load_from_file() -> Result<(), Error> {
        let conf = RootConfig::load_from(&test_file())?;
        assert_eq!(conf.logger.level, "warn");
        assert_eq!(conf.cluster.loadbalance, "random");
        assert_eq!(conf.cluster.mock.invoker_cache_capacity, 128);
        assert_eq!(conf.cluster.mock.throwable_cache_capacity, 8);
        Ok(())
    }

    #[test]
    fn test_root_config_is_always_available() {
        // no dubbo.yaml next to the test binary, defaults are used
        let conf = dubbo_config::get_root_config();
        assert!(!conf.cluster.loadbalance.is_empty());
    }
}
