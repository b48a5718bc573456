/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::types::Destination;

/// Default directory holding the client's TLS material
pub const DEFAULT_CERT_DIR: &str = "/etc/onos/certs";

/// Default bound on establishing the connection to the service
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of back-to-back receive errors a watch tolerates before giving up
pub(crate) const DEFAULT_MAX_CONSECUTIVE_WATCH_ERRORS: usize = 5;

// Upper bound for the consecutive watch error setting
const MAX_CONSECUTIVE_WATCH_ERRORS_LIMIT: usize = 1024;

#[derive(Debug)]
pub struct ConfigurationError(String);

impl ConfigurationError {
    pub fn new<T>(message: T) -> ConfigurationError
    where
        T: Into<String>,
    {
        ConfigurationError(message.into())
    }
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Configuration error: {}", self.0))
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Clone, Debug)]
pub struct ClientConfiguration {
    pub destination: Destination,
    pub cert_dir: PathBuf,
    pub connect_timeout: Duration,
    pub request_timeout: Option<Duration>,
    pub max_consecutive_watch_errors: usize,
}

/// Holder object for subscription task client configuration options; this performs validation of configuration
/// parameters at construction time.
impl ClientConfiguration {
    /// Create an "immutable" (Arc) `ClientConfiguration` object from a set of configuration parameters.
    ///
    /// # Arguments
    ///
    /// * `destination` - addresses of the subscription task service; only the first one is connected to
    /// * `cert_dir` - directory holding `tls.cacrt`, `tls.crt` and `tls.key`, defaults to DEFAULT_CERT_DIR when `None` is passed
    /// * `connect_timeout` - bound on establishing the connection, defaults to 10 seconds when `None` or zero is passed
    /// * `request_timeout` - deadline applied to each `get` and `list` call, no deadline when `None` is passed
    /// * `max_consecutive_watch_errors` - receive errors in a row after which a watch is ended, defaults to 5 when `None` or 0 is passed, capped at 1024
    ///
    /// # Errors
    ///
    /// Returns a ConfigurationError in case the destination holds no addresses, or its first address is blank.
    pub fn create(
        destination: Destination,
        cert_dir: Option<PathBuf>,
        connect_timeout: Option<Duration>,
        request_timeout: Option<Duration>,
        max_consecutive_watch_errors: Option<usize>,
    ) -> Result<Arc<ClientConfiguration>, ConfigurationError> {
        let Some(address) = destination.primary() else {
            return Err(ConfigurationError::new(
                "Destination must contain at least one address",
            ));
        };
        if address.trim().is_empty() {
            return Err(ConfigurationError::new("Destination address is empty"));
        }
        if request_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ConfigurationError::new("Request timeout must not be zero"));
        }

        Ok(Arc::new(ClientConfiguration {
            destination,
            cert_dir: cert_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CERT_DIR)),
            connect_timeout: connect_timeout
                .filter(|timeout| !timeout.is_zero())
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            request_timeout,
            max_consecutive_watch_errors: match max_consecutive_watch_errors {
                None | Some(0) => DEFAULT_MAX_CONSECUTIVE_WATCH_ERRORS,
                Some(n) => n.min(MAX_CONSECUTIVE_WATCH_ERRORS_LIMIT),
            },
        }))
    }

    /// Configuration for `destination` with every other setting at its default
    pub fn for_destination(
        destination: Destination,
    ) -> Result<Arc<ClientConfiguration>, ConfigurationError> {
        Self::create(destination, None, None, None, None)
    }
}
