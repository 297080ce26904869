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
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

use dubbo_base::{Node, Url};
use dubbo_cluster::{
    ClusterInvoker, MockClusterInvoker, MockContext, MockFactories, MockInvoker, ServiceImpl,
    StaticDirectory,
};
use dubbo_config::{ClusterConfig, RootConfig};
use dubbo_rpc::{
    BaseInvoker, BoxInvoker, Invoker, RpcError, RpcInvocation, RpcOutput, ValueType,
};
use serde_json::{json, Value};

const DEMO: &str = "org.apache.dubbo.DemoService";

#[derive(Debug)]
struct IllegalStateException(String);

impl fmt::Display for IllegalStateException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for IllegalStateException {}

impl From<String> for IllegalStateException {
    fn from(message: String) -> Self {
        IllegalStateException(message)
    }
}

#[derive(Default)]
struct DemoServiceMock;

impl ServiceImpl for DemoServiceMock {
    fn implements(&self, interface: &str) -> bool {
        interface == DEMO
    }

    fn call(&self, method: &str, _args: &[Value]) -> Result<Value, RpcError> {
        Ok(json!(format!("{} from mock", method)))
    }
}

/// Provider stand-in counting calls, failing with a network error when `down`.
#[derive(Debug)]
struct Provider {
    base: BaseInvoker,
    calls: AtomicUsize,
    down: bool,
}

impl Provider {
    fn new(url: Url, down: bool) -> Arc<Self> {
        Arc::new(Provider {
            base: BaseInvoker::new(url),
            calls: AtomicUsize::new(0),
            down,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Node for Provider {
    fn get_url(&self) -> Arc<Url> {
        self.base.get_url()
    }

    fn is_available(&self) -> bool {
        self.base.is_available()
    }

    fn destroy(&self) {
        self.base.destroy()
    }
}

impl Invoker for Provider {
    fn invoke(&self, _invocation: &RpcInvocation) -> Result<RpcOutput, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down {
            Err(RpcError::Network("connection refused".to_string()))
        } else {
            Ok(RpcOutput::new(json!("from provider")))
        }
    }
}

fn context(config: &ClusterConfig) -> Arc<MockContext> {
    let factories = MockFactories::new();
    factories.register_service_type::<DemoServiceMock>("org.apache.dubbo.DemoServiceMock");
    factories.register_exception_type::<IllegalStateException>("java.lang.IllegalStateException");
    Arc::new(MockContext::from_cluster_config(Arc::new(factories), config))
}

fn service_url(mock: &str) -> Url {
    let mut url = Url::with_parts("tri", "127.0.0.1", 20880, DEMO);
    url.set_param("interface", DEMO);
    url.set_param("mock", mock);
    url
}

fn say_hello() -> RpcInvocation {
    RpcInvocation::new()
        .with_service_unique_name(DEMO.to_string())
        .with_method_name("sayHello".to_string())
        .with_arguments(vec![ValueType::String], vec![json!("world")])
}

#[test]
fn test_force_return_never_reaches_provider() {
    let provider = Provider::new(service_url("force:return hello"), false);
    let invoker = MockClusterInvoker::new(provider.clone(), context(&ClusterConfig::default()));
    let output = invoker.invoke(&say_hello()).unwrap();
    assert_eq!(output.value(), &json!("hello"));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_throw_named_exception_has_fixed_message() {
    let invoker = MockInvoker::new(
        Arc::new(service_url("throw java.lang.IllegalStateException")),
        context(&ClusterConfig::default()),
    );
    let err = invoker.invoke(&say_hello()).unwrap_err();
    assert!(err.is_biz());
    assert_eq!(err.to_string(), "mocked exception for service degradation.");
    let cause = err.biz_cause().unwrap();
    assert!(cause.downcast_ref::<IllegalStateException>().is_some());
}

#[test]
fn test_throw_colon_form() {
    let invoker = MockInvoker::new(
        Arc::new(service_url("throw:java.lang.IllegalStateException")),
        context(&ClusterConfig::default()),
    );
    let err = invoker.invoke(&say_hello()).unwrap_err();
    assert!(err.is_biz());
    assert_eq!(err.to_string(), "mocked exception for service degradation.");
    let cause = err.biz_cause().unwrap();
    let exception = cause.downcast_ref::<IllegalStateException>().unwrap();
    assert_eq!(exception.0, "mocked exception for service degradation.");
}

#[test]
fn test_return_colon_form_on_string_method() {
    let context = context(&ClusterConfig::default());
    let invocation = say_hello().with_return_type(ValueType::String);

    let provider = Provider::new(service_url("return:hello"), false);
    let invoker = MockInvoker::new(provider.get_url(), context.clone());
    assert_eq!(invoker.invoke(&invocation).unwrap().value(), &json!("hello"));
    assert_eq!(provider.calls(), 0);

    let provider = Provider::new(service_url("force:return:hello"), false);
    let invoker = MockClusterInvoker::new(provider.clone(), context);
    assert_eq!(invoker.invoke(&invocation).unwrap().value(), &json!("hello"));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_fail_mock_through_cluster() {
    let url = service_url("fail:return `degraded`");
    let providers: Vec<Arc<Provider>> = (0..3).map(|_| Provider::new(url.clone(), true)).collect();
    let invokers: Vec<BoxInvoker> = providers.iter().map(|p| p.clone() as BoxInvoker).collect();
    let cluster = ClusterInvoker::new(url, Arc::new(StaticDirectory::new(invokers)));
    let invoker = MockClusterInvoker::new(Arc::new(cluster), context(&ClusterConfig::default()));

    for _ in 0..10 {
        assert_eq!(invoker.invoke(&say_hello()).unwrap().value(), &json!("degraded"));
    }
    let calls: usize = providers.iter().map(|p| p.calls()).sum();
    assert_eq!(calls, 10);
}

#[test]
fn test_default_delegate_is_shared_across_threads() {
    let context = context(&ClusterConfig::default());
    let url = Arc::new(service_url("force"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = context.clone();
            let url = url.clone();
            thread::spawn(move || {
                let invoker = MockInvoker::new(url, context);
                invoker.invoke(&say_hello()).unwrap().into_value()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), json!("sayHello from mock"));
    }

    assert_eq!(context.invoker_cache().len(), 1);
    let first = context.get_invoker("default", &url).unwrap();
    let second = context.get_invoker("default", &url).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_cache_bounds_from_yaml() {
    let yaml = r#"
dubbo:
  cluster:
    mock:
      invoker_cache_capacity: 0
      throwable_cache_capacity: 0
"#;
    let config = RootConfig::from_yaml_str(yaml).unwrap();
    let context = context(&config.cluster);

    let invoker = MockInvoker::new(Arc::new(service_url("default")), context.clone());
    assert_eq!(invoker.invoke(&say_hello()).unwrap().value(), &json!("sayHello from mock"));
    assert!(context.invoker_cache().is_empty());

    let invoker = MockInvoker::new(
        Arc::new(service_url("throw java.lang.IllegalStateException")),
        context.clone(),
    );
    assert!(invoker.invoke(&say_hello()).unwrap_err().is_biz());
    assert!(context.throwable_cache().is_empty());
}

#[test]
fn test_empty_return_of_list_type() {
    let invoker = MockInvoker::new(
        Arc::new(service_url("return empty")),
        context(&ClusterConfig::default()),
    );
    let invocation = say_hello().with_return_type(ValueType::list_of(ValueType::Int));
    assert_eq!(invoker.invoke(&invocation).unwrap().value(), &json!([]));

    let invocation = say_hello().with_return_type(ValueType::list_of(ValueType::Int));
    let invoker = MockInvoker::new(
        Arc::new(service_url("return [1, 2, \"3\"]")),
        context(&ClusterConfig::default()),
    );
    assert_eq!(invoker.invoke(&invocation).unwrap().value(), &json!([1, 2, 3]));
}
