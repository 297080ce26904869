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
    collections::HashMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::constants::{DOT_SEPARATOR, GROUP_KEY, INTERFACE_KEY, VERSION_KEY};
use dubbo_logger::tracing;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Url {
    pub raw_url_string: String,
    // value of scheme is different to base name, eg. triple -> tri://
    pub scheme: String,
    pub location: String,
    pub ip: String,
    pub port: String,
    // serviceKey format in dubbo java and go '{group}/{interfaceName}:{version}'
    pub service_key: String,
    // same to interfaceName
    pub service_name: String,
    pub params: HashMap<String, String>,
}

impl Url {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds an url from its parts, parameters can be added with [`Url::set_param`].
    pub fn with_parts(scheme: &str, ip: &str, port: u16, service_name: &str) -> Self {
        let mut url = Url {
            scheme: scheme.to_string(),
            ip: ip.to_string(),
            port: port.to_string(),
            location: format!("{}:{}", ip, port),
            service_name: service_name.to_string(),
            ..Default::default()
        };
        url.renew_raw_url_string();
        url
    }

    pub fn from_url(url: &str) -> Option<Self> {
        // url: tri://127.0.0.1:8888/helloworld.Greeter?weight=100
        let uri = url
            .parse::<http::Uri>()
            .map_err(|err| {
                tracing::error!("fail to parse url({}), err: {:?}", url, err);
            })
            .ok()?;
        let authority = uri.authority()?;
        let path = uri.path().trim_start_matches('/').to_string();
        let mut url_inst = Self {
            raw_url_string: url.to_string(),
            scheme: uri.scheme_str()?.to_string(),
            ip: authority.host().to_string(),
            port: authority.port()?.to_string(),
            location: authority.to_string(),
            service_key: path.clone(),
            service_name: path,
            params: uri.query().map(Url::decode).unwrap_or_default(),
        };
        url_inst.renew_raw_url_string();
        Some(url_inst)
    }

    pub fn get_service_name(&self) -> String {
        self.service_name.clone()
    }

    /// The service interface this endpoint serves, `interface` param first, then the path.
    pub fn service_interface(&self) -> String {
        self.get_param(INTERFACE_KEY)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.service_name.clone())
    }

    pub fn get_param(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }

    /// Looks up `{method}.{key}`, e.g. `sayHello.mock`.
    pub fn get_method_param(&self, method: &str, key: &str) -> Option<String> {
        self.params
            .get(&format!("{}{}{}", method, DOT_SEPARATOR, key))
            .cloned()
    }

    /// Parses the param into `T`, unparsable values are logged and treated as absent.
    pub fn get_param_as<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.params.get(key)?;
        match raw.trim().parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("url param {}={} can not be parsed, ignored", key, raw);
                None
            }
        }
    }

    /// Like [`Url::get_param_as`] but tries `{method}.{key}` before `key`.
    pub fn get_method_param_as<T: FromStr>(&self, method: &str, key: &str) -> Option<T> {
        self.get_param_as::<T>(&format!("{}{}{}", method, DOT_SEPARATOR, key))
            .or_else(|| self.get_param_as::<T>(key))
    }

    fn encode_param(&self) -> String {
        let mut params_vec: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        // keep the raw string stable regardless of hash order
        params_vec.sort();
        if params_vec.is_empty() {
            "".to_string()
        } else {
            format!("?{}", params_vec.join("&"))
        }
    }

    pub fn params_count(&self) -> usize {
        self.params.len()
    }

    fn decode(raw_query_string: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        for pair in raw_query_string.split('&') {
            let mut kv = pair.trim().splitn(2, '=');
            match (kv.next(), kv.next()) {
                (Some(k), Some(v)) if !k.trim().is_empty() => {
                    params.insert(k.trim().to_string(), v.trim().to_string());
                }
                _ => continue,
            }
        }
        params
    }

    /// Form-decodes a parameter value: `+` is a space, then percent escapes.
    /// Values that do not decode are returned with only `+` replaced.
    pub fn decode_value(value: &str) -> String {
        let value = value.replace('+', " ");
        match urlencoding::decode(&value) {
            Ok(v) => v.into_owned(),
            Err(_) => value,
        }
    }

    pub fn set_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
        self.renew_raw_url_string();
    }

    pub fn remove_param(&mut self, key: &str) -> Option<String> {
        let removed = self.params.remove(key);
        self.renew_raw_url_string();
        removed
    }

    pub fn raw_url_string(&self) -> String {
        self.raw_url_string.clone()
    }

    fn build_service_key(&self) -> String {
        format!(
            "{group}/{interfaceName}:{version}",
            group = self.get_param(GROUP_KEY).unwrap_or("default".to_string()),
            interfaceName = self.service_interface(),
            version = self.get_param(VERSION_KEY).unwrap_or("1.0.0".to_string())
        )
    }

    fn renew_raw_url_string(&mut self) {
        self.raw_url_string = format!(
            "{}://{}:{}/{}{}",
            self.scheme,
            self.ip,
            self.port,
            self.service_name,
            self.encode_param()
        );
        self.service_key = self.build_service_key()
    }

    // short_url identifies the endpoint without its params
    pub fn short_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.scheme, self.ip, self.port, self.service_name
        )
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw_url_string().as_str())
    }
}

impl FromStr for Url {
    type Err = crate::StdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::from_url(s).ok_or_else(|| format!("invalid url: {}", s).into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        constants::{ANYHOST_KEY, VERSION_KEY},
        url::Url,
    };

    #[test]
    fn test_from_url() {
        let mut u1 = Url::from_url("tri://127.0.0.1:20000/com.ikurento.user.UserProvider?anyhost=true&\
        application=BDTService&category=providers&default.timeout=10000&\
        environment=dev&interface=com.ikurento.user.UserProvider&ip=192.168.56.1&methods=GetUser%2C&\
        side=provider&timeout=3000&timestamp=1556509797245&version=1.0.0&application=test")
        .unwrap();
        assert_eq!(u1.service_key, "default/com.ikurento.user.UserProvider:1.0.0");
        assert_eq!(u1.get_param(ANYHOST_KEY).unwrap().as_str(), "true");
        assert_eq!(u1.get_param("default.timeout").unwrap().as_str(), "10000");
        assert_eq!(u1.scheme, "tri");
        assert_eq!(u1.ip, "127.0.0.1");
        assert_eq!(u1.port, "20000");
        assert_eq!(u1.params_count(), 12);
        u1.set_param("key1", "value1");
        assert_eq!(u1.get_param("key1").unwrap().as_str(), "value1");
        assert_eq!(u1.get_param(VERSION_KEY).unwrap().as_str(), "1.0.0");
    }

    #[test]
    fn test_invalid_url() {
        assert!(Url::from_url("not a url").is_none());
        assert!("tri://127.0.0.1/no.port".parse::<Url>().is_err());
    }

    #[test]
    fn test_method_param() {
        let url = Url::from_url(
            "tri://127.0.0.1:8888/org.apache.dubbo.Greeter?weight=50&sayHello.weight=7&mock=force%3Areturn%20null",
        )
        .unwrap();
        assert_eq!(url.get_method_param("sayHello", "weight").unwrap(), "7");
        assert_eq!(url.get_method_param("other", "weight"), None);
        assert_eq!(url.get_method_param_as::<u32>("sayHello", "weight"), Some(7));
        assert_eq!(url.get_method_param_as::<u32>("other", "weight"), Some(50));
        assert_eq!(
            Url::decode_value(&url.get_param("mock").unwrap()),
            "force:return null"
        );
    }

    #[test]
    fn test_decode_form_encoded_value() {
        let url = Url::from_url("tri://127.0.0.1:20880/a.B?mock=force%3Areturn+null").unwrap();
        assert_eq!(Url::decode_value(&url.get_param("mock").unwrap()), "force:return null");
        assert_eq!(Url::decode_value("return+%2B1"), "return +1");
        assert_eq!(Url::decode_value("a+%zz"), "a %zz");
    }

    #[test]
    fn test_param_value_with_equals() {
        let url = Url::from_url("tri://127.0.0.1:8888/a.B?mock=return:a=b").unwrap();
        assert_eq!(url.get_param("mock").unwrap(), "return:a=b");
    }

    #[test]
    fn test_service_interface() {
        let mut url = Url::with_parts("tri", "0.0.0.0", 8888, "greeter");
        assert_eq!(url.service_interface(), "greeter");
        url.set_param("interface", "org.apache.dubbo.sample.tri.Greeter");
        assert_eq!(url.service_interface(), "org.apache.dubbo.sample.tri.Greeter");
        assert_eq!(
            url.raw_url_string(),
            "tri://0.0.0.0:8888/greeter?interface=org.apache.dubbo.sample.tri.Greeter"
        );
    }

    #[test]
    fn test_unparsable_param() {
        let mut url = Url::with_parts("tri", "0.0.0.0", 8888, "greeter");
        url.set_param("weight", "heavy");
        assert_eq!(url.get_param_as::<u32>("weight"), None);
    }
}
