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

use std::sync::Arc;

use dubbo_base::StdError;
use thiserror::Error;

/// A cloneable error instance, used where one error value is handed to many callers.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Numeric codes shared with the other dubbo implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorCode {
    Unknown = 0,
    Network = 1,
    Timeout = 2,
    Biz = 3,
    Forbidden = 4,
    Serialization = 5,
}

#[derive(Error, Debug, Clone)]
pub enum RpcError {
    /// Invalid or unresolvable configuration, e.g. a blank mock directive.
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<SharedError>,
    },

    /// A configured literal could not be turned into the declared return type.
    #[error("{message}")]
    Coercion {
        message: String,
        #[source]
        source: Option<SharedError>,
    },

    /// Failure raised by the service itself, surfaced to the caller as is.
    #[error("{0}")]
    Biz(#[source] SharedError),

    #[error("{0}")]
    Degraded(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Unknown(String),
}

impl RpcError {
    pub fn config(message: impl Into<String>) -> Self {
        RpcError::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with(message: impl Into<String>, source: impl Into<SharedErrorSource>) -> Self {
        RpcError::Config {
            message: message.into(),
            source: Some(source.into().0),
        }
    }

    pub fn coercion(message: impl Into<String>) -> Self {
        RpcError::Coercion {
            message: message.into(),
            source: None,
        }
    }

    pub fn coercion_with(
        message: impl Into<String>,
        source: impl Into<SharedErrorSource>,
    ) -> Self {
        RpcError::Coercion {
            message: message.into(),
            source: Some(source.into().0),
        }
    }

    pub fn biz(source: impl Into<SharedErrorSource>) -> Self {
        RpcError::Biz(source.into().0)
    }

    pub fn code(&self) -> RpcErrorCode {
        match self {
            RpcError::Biz(_) => RpcErrorCode::Biz,
            RpcError::Network(_) => RpcErrorCode::Network,
            RpcError::Timeout(_) => RpcErrorCode::Timeout,
            RpcError::Forbidden(_) => RpcErrorCode::Forbidden,
            RpcError::Serialization(_) => RpcErrorCode::Serialization,
            RpcError::Config { .. }
            | RpcError::Coercion { .. }
            | RpcError::Degraded(_)
            | RpcError::Unknown(_) => RpcErrorCode::Unknown,
        }
    }

    pub fn is_biz(&self) -> bool {
        self.code() == RpcErrorCode::Biz
    }

    /// The error carried by a business failure.
    pub fn biz_cause(&self) -> Option<&SharedError> {
        match self {
            RpcError::Biz(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Adapter so constructors accept owned errors, boxed errors and shared errors alike.
pub struct SharedErrorSource(SharedError);

impl From<SharedError> for SharedErrorSource {
    fn from(err: SharedError) -> Self {
        SharedErrorSource(err)
    }
}

impl From<StdError> for SharedErrorSource {
    fn from(err: StdError) -> Self {
        SharedErrorSource(Arc::from(err))
    }
}

impl From<RpcError> for SharedErrorSource {
    fn from(err: RpcError) -> Self {
        SharedErrorSource(Arc::new(err))
    }
}

impl From<serde_json::Error> for SharedErrorSource {
    fn from(err: serde_json::Error) -> Self {
        SharedErrorSource(Arc::new(err))
    }
}
