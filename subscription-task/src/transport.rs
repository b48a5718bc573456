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

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tonic::Status;

use crate::api::{
    E2SubscriptionTaskServiceClient, GetSubscriptionTaskRequest, GetSubscriptionTaskResponse,
    ListSubscriptionTasksRequest, ListSubscriptionTasksResponse, WatchSubscriptionTasksRequest,
    WatchSubscriptionTasksResponse,
};
use crate::{ClientError, TransportCredentials};

/// Server-pushed watch messages, ending when the service closes the stream
pub type EventStream = BoxStream<'static, Result<WatchSubscriptionTasksResponse, Status>>;

/// The remote operations of the subscription task service, as consumed by `SubscriptionTaskClient`.
///
/// This is the seam between the client facade and the wire, so that the facade can be exercised
/// against mock implementations.
#[async_trait]
pub trait SubscriptionTaskTransport: Send + Sync {
    async fn get_subscription_task(
        &self,
        request: GetSubscriptionTaskRequest,
    ) -> Result<GetSubscriptionTaskResponse, Status>;

    async fn list_subscription_tasks(
        &self,
        request: ListSubscriptionTasksRequest,
    ) -> Result<ListSubscriptionTasksResponse, Status>;

    /// Open a server stream; returns once the stream is established
    async fn watch_subscription_tasks(
        &self,
        request: WatchSubscriptionTasksRequest,
    ) -> Result<EventStream, Status>;
}

/// Connection factory: establishes the channel to one service address.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        address: String,
        credentials: TransportCredentials,
    ) -> Result<Arc<dyn SubscriptionTaskTransport>, ClientError>;
}

/// `SubscriptionTaskTransport` over a tonic `Channel`; every call multiplexes over the same connection
#[derive(Clone, Debug)]
pub struct GrpcSubscriptionTaskTransport {
    client: E2SubscriptionTaskServiceClient,
}

impl GrpcSubscriptionTaskTransport {
    pub fn new(channel: Channel) -> Self {
        GrpcSubscriptionTaskTransport {
            client: E2SubscriptionTaskServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl SubscriptionTaskTransport for GrpcSubscriptionTaskTransport {
    async fn get_subscription_task(
        &self,
        request: GetSubscriptionTaskRequest,
    ) -> Result<GetSubscriptionTaskResponse, Status> {
        let response = self.client.clone().get_subscription_task(request).await?;
        Ok(response.into_inner())
    }

    async fn list_subscription_tasks(
        &self,
        request: ListSubscriptionTasksRequest,
    ) -> Result<ListSubscriptionTasksResponse, Status> {
        let response = self.client.clone().list_subscription_tasks(request).await?;
        Ok(response.into_inner())
    }

    async fn watch_subscription_tasks(
        &self,
        request: WatchSubscriptionTasksRequest,
    ) -> Result<EventStream, Status> {
        let response = self.client.clone().watch_subscription_tasks(request).await?;
        Ok(response.into_inner().boxed())
    }
}

/// Dials the service with tonic, applying TLS settings from the given credentials
#[derive(Clone, Debug)]
pub struct GrpcConnector {
    connect_timeout: Duration,
}

impl GrpcConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        GrpcConnector { connect_timeout }
    }
}

// Addresses without a scheme default to https for TLS and http for plaintext credentials
pub(crate) fn endpoint_for(
    address: &str,
    credentials: &TransportCredentials,
) -> Result<Endpoint, ClientError> {
    let uri = match (address.contains("://"), credentials) {
        (true, _) => address.to_string(),
        (false, TransportCredentials::Insecure) => format!("http://{address}"),
        (false, TransportCredentials::Tls { .. }) => format!("https://{address}"),
    };
    let endpoint = Endpoint::from_shared(uri)
        .map_err(|e| ClientError::connection(format!("Invalid address {address}: {e}")))?;

    match credentials {
        TransportCredentials::Insecure => Ok(endpoint),
        TransportCredentials::Tls {
            ca_certificate,
            identity,
            domain_name,
        } => {
            let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(ca_certificate));
            if let Some(identity) = identity {
                tls = tls.identity(Identity::from_pem(&identity.certificate, &identity.key));
            }
            if let Some(domain_name) = domain_name {
                tls = tls.domain_name(domain_name.clone());
            }
            endpoint
                .tls_config(tls)
                .map_err(|e| ClientError::connection(format!("TLS setup for {address} failed: {e}")))
        }
    }
}

#[async_trait]
impl Connector for GrpcConnector {
    async fn connect(
        &self,
        address: String,
        credentials: TransportCredentials,
    ) -> Result<Arc<dyn SubscriptionTaskTransport>, ClientError> {
        let endpoint = endpoint_for(&address, &credentials)?.connect_timeout(self.connect_timeout);

        debug!("Connecting to subscription task service at {}", endpoint.uri());
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ClientError::connection(format!("Error connecting to {address}: {e}")))?;

        Ok(Arc::new(GrpcSubscriptionTaskTransport::new(channel)))
    }
}
