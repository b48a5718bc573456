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

/*!
subscription-task is a client for the E2 subscription task service of the ONOS RIC, for the rust programming language.

The service is reached over gRPC (`onos.e2sub.task.E2SubscriptionTaskService`). This crate connects to it and lets
callers get a single subscription task, list subscription tasks, and watch a live stream of subscription task changes,
with optional filtering by subscription and endpoint ID.

## Library contents

* `SubscriptionTaskClient`, the client facade with `connect`, `get`, `list`, `watch` and `close` operations
* filter options `with_subscription_id()` and `with_endpoint_id()`, usable for both `list` and `watch`
* `api` module, with the wire messages and gRPC stub of the service
* `CredentialProvider` and `Connector` traits, the seams for supplying TLS material and establishing connections

## Example

```no_run
use subscription_task::{
    with_endpoint_id, ClientConfiguration, Destination, SubscriptionTaskClient,
};
use tokio_util::sync::CancellationToken;

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let config = ClientConfiguration::for_destination(Destination::new(["onos-e2sub:5150"]))?;
let client = SubscriptionTaskClient::connect(config).await?;

let tasks = client.list(&[with_endpoint_id("e2node-1")]).await?;

let (sink, mut events) = tokio::sync::mpsc::channel(16);
client.watch(CancellationToken::new(), sink, &[]).await?;
while let Some(event) = events.recv().await {
    println!("{event:?}");
}

client.close().await?;
# Ok(())
# }
```

## Note

The `subscription-task-cli` module provides a command line frontend for these operations.
*/

mod common {
    pub(crate) mod helpers;
}
pub use common::helpers::init_once;
pub(crate) use common::*;

pub mod api;

mod client;
pub use client::SubscriptionTaskClient;

mod configuration;
pub use configuration::{ClientConfiguration, ConfigurationError, DEFAULT_CERT_DIR};

mod credentials;
pub use credentials::{
    ClientIdentity, CredentialProvider, FileCredentialProvider, InsecureCredentialProvider,
    TransportCredentials, CA_CERT_FILE, CLIENT_CERT_FILE, CLIENT_KEY_FILE,
};

mod error;
pub use error::ClientError;

mod filter;
pub use filter::{
    with_endpoint_id, with_subscription_id, FilterCriteria, FilterOption, ListOption, WatchOption,
};

mod transport;
pub use transport::{
    Connector, EventStream, GrpcConnector, GrpcSubscriptionTaskTransport,
    SubscriptionTaskTransport,
};

mod types;
pub use types::{Destination, EndpointId, SubscriptionId, SubscriptionTaskId};

#[cfg(test)]
mod tests;
#[cfg(test)]
pub(crate) use tests::*;
