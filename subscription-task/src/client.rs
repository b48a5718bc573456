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

use futures::StreamExt;
use log::*;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tonic::{Code, Status};

use crate::api::{
    Event, GetSubscriptionTaskRequest, ListSubscriptionTasksRequest, SubscriptionTask,
    WatchSubscriptionTasksRequest,
};
use crate::filter::{FilterCriteria, ListOption, WatchOption};
use crate::transport::{Connector, EventStream, GrpcConnector, SubscriptionTaskTransport};
use crate::{
    helpers, ClientConfiguration, ClientError, ConfigurationError, CredentialProvider,
    FileCredentialProvider, SubscriptionTaskId,
};

/// Client of the E2 subscription task service.
///
/// A client owns exactly one connection, and all `get`, `list` and `watch` calls multiplex over it.
/// The connection is released by `close()`, which also ends every watch started through this client.
pub struct SubscriptionTaskClient {
    config: Arc<ClientConfiguration>,

    // `None` once the client has been closed
    transport: RwLock<Option<Arc<dyn SubscriptionTaskTransport>>>,

    shutdown: CancellationToken,
    relays: TaskTracker,
}

impl SubscriptionTaskClient {
    /// Connect to the first address of the configured destination, using TLS material from the configured
    /// certificate directory.
    ///
    /// # Errors
    ///
    /// * `ClientError::Credential` if the TLS material can not be loaded
    /// * `ClientError::Connection` if the channel to the service can not be established
    pub async fn connect(config: Arc<ClientConfiguration>) -> Result<Self, ClientError> {
        let credential_provider = FileCredentialProvider::new(config.cert_dir.clone());
        let connector = GrpcConnector::new(config.connect_timeout);

        Self::connect_with(config, &credential_provider, &connector).await
    }

    /// Connect like `connect()`, with explicitly supplied credential provider and connection factory.
    ///
    /// The credential provider is queried exactly once. Only the first destination address is dialed,
    /// there is no failover to further addresses.
    pub async fn connect_with(
        config: Arc<ClientConfiguration>,
        credential_provider: &dyn CredentialProvider,
        connector: &dyn Connector,
    ) -> Result<Self, ClientError> {
        let Some(address) = config.destination.primary().map(str::to_string) else {
            return Err(ConfigurationError::new("Destination must contain at least one address").into());
        };

        let credentials = credential_provider.client_credentials()?;
        let transport = connector.connect(address.clone(), credentials).await?;

        info!("Connected to subscription task service at {address}");
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client on top of an already established transport
    pub fn with_transport(
        config: Arc<ClientConfiguration>,
        transport: Arc<dyn SubscriptionTaskTransport>,
    ) -> Self {
        SubscriptionTaskClient {
            config,
            transport: RwLock::new(Some(transport)),
            shutdown: CancellationToken::new(),
            relays: TaskTracker::new(),
        }
    }

    async fn transport(&self) -> Result<Arc<dyn SubscriptionTaskTransport>, ClientError> {
        self.transport.read().await.clone().ok_or(ClientError::Closed)
    }

    // Bound a unary call by the configured request timeout, and abort it when the client gets closed
    async fn unary<T, F>(&self, call: F) -> Result<T, Status>
    where
        F: Future<Output = Result<T, Status>>,
    {
        let bounded = async {
            match self.config.request_timeout {
                None => call.await,
                Some(timeout) => tokio::time::timeout(timeout, call)
                    .await
                    .unwrap_or_else(|_| {
                        Err(Status::deadline_exceeded(format!(
                            "No response within {timeout:?}"
                        )))
                    }),
            }
        };

        tokio::select! {
            result = bounded => result,
            _ = self.shutdown.cancelled() => Err(Status::cancelled("Client closed")),
        }
    }

    /// Get the subscription task with the given ID.
    ///
    /// The ID is not validated locally; empty or malformed IDs are rejected by the service.
    ///
    /// # Errors
    ///
    /// * `ClientError::NotFound` if the service knows no such task
    /// * `ClientError::Transport` for any channel-level failure
    pub async fn get<T>(&self, id: T) -> Result<SubscriptionTask, ClientError>
    where
        T: Into<SubscriptionTaskId>,
    {
        let id: SubscriptionTaskId = id.into();
        let transport = self.transport().await?;

        debug!("Getting subscription task {id}");
        let request = GetSubscriptionTaskRequest { id: id.to_string() };
        let response = self
            .unary(transport.get_subscription_task(request))
            .await
            .map_err(|status| match status.code() {
                Code::NotFound => ClientError::NotFound(id.to_string()),
                _ => ClientError::Transport(status),
            })?;

        response
            .task
            .ok_or_else(|| ClientError::NotFound(id.into_inner()))
    }

    /// List subscription tasks, optionally narrowed by `options`.
    ///
    /// Tasks are returned exactly as the service sends them, without re-sorting, filtering or deduplication.
    pub async fn list(&self, options: &[ListOption]) -> Result<Vec<SubscriptionTask>, ClientError> {
        let transport = self.transport().await?;

        let criteria = FilterCriteria::from_options(options);
        debug!("Listing subscription tasks, filter {criteria:?}");
        let response = self
            .unary(transport.list_subscription_tasks(ListSubscriptionTasksRequest::from(criteria)))
            .await
            .map_err(ClientError::Transport)?;

        debug!("Returning {} subscription task entries", response.tasks.len());
        Ok(response.tasks)
    }

    /// Watch changes of subscription tasks, optionally narrowed by `options`.
    ///
    /// Returns once the server stream is established. From then on a relaying task forwards every event into
    /// `sink`, in the order received. The relaying task drops `sink`, which ends the receiving side, when
    /// - the service ends the stream, or reports it cancelled
    /// - `cancel` is cancelled, or the client is closed
    /// - the receiving side of `sink` is dropped
    /// - `max_consecutive_watch_errors` receive errors occurred back to back
    ///
    /// Other receive errors are logged, and receiving continues.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the stream can not be opened; `sink` is dropped right away in that case
    /// and no relaying task is started.
    ///
    /// # Returns
    ///
    /// The handle of the relaying task, which completes when the watch has ended.
    pub async fn watch(
        &self,
        cancel: CancellationToken,
        sink: mpsc::Sender<Event>,
        options: &[WatchOption],
    ) -> Result<JoinHandle<()>, ClientError> {
        let transport = self.transport().await?;

        let criteria = FilterCriteria::from_options(options);
        debug!("Watching subscription tasks, filter {criteria:?}");
        let request = WatchSubscriptionTasksRequest::from(criteria);

        let stream = tokio::select! {
            result = transport.watch_subscription_tasks(request) => {
                result.map_err(ClientError::Transport)?
            }
            _ = cancel.cancelled() => {
                return Err(ClientError::Transport(Status::cancelled("Watch cancelled")));
            }
            _ = self.shutdown.cancelled() => {
                return Err(ClientError::Transport(Status::cancelled("Client closed")));
            }
        };

        let relay = EventRelay {
            stream,
            sink,
            cancel,
            shutdown: self.shutdown.clone(),
            max_consecutive_errors: self.config.max_consecutive_watch_errors,
        };
        Ok(helpers::spawn_and_log_error(&self.relays, relay.run()))
    }

    /// Close the client: end all outstanding watches, wait for their relaying tasks to finish, and release the
    /// connection. Calling this more than once is fine; every call after the first is a no-op.
    pub async fn close(&self) -> Result<(), ClientError> {
        let Some(_transport) = self.transport.write().await.take() else {
            debug!("Subscription task client already closed");
            return Ok(());
        };

        self.shutdown.cancel();
        self.relays.close();
        self.relays.wait().await;

        info!("Subscription task client closed");
        Ok(())
    }
}

impl Drop for SubscriptionTaskClient {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// Forwards watch stream messages into a caller-owned sink; the sink is dropped when `run()` returns
struct EventRelay {
    stream: EventStream,
    sink: mpsc::Sender<Event>,
    cancel: CancellationToken,
    shutdown: CancellationToken,
    max_consecutive_errors: usize,
}

impl EventRelay {
    async fn run(mut self) -> Result<(), ClientError> {
        let mut consecutive_errors: usize = 0;

        loop {
            let message = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("Subscription task watch cancelled");
                    return Ok(());
                }
                _ = self.shutdown.cancelled() => {
                    debug!("Client closed, ending subscription task watch");
                    return Ok(());
                }
                message = self.stream.next() => message,
            };

            let response = match message {
                None => {
                    debug!("Subscription task watch stream ended");
                    return Ok(());
                }
                Some(Err(status)) if status.code() == Code::Cancelled => {
                    debug!("Subscription task watch stream cancelled: {status}");
                    return Ok(());
                }
                Some(Err(status)) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.max_consecutive_errors {
                        return Err(ClientError::Transport(status));
                    }
                    error!(
                        "An error occurred in receiving subscription task changes ({consecutive_errors}/{}): {status}",
                        self.max_consecutive_errors
                    );
                    continue;
                }
                Some(Ok(response)) => response,
            };
            consecutive_errors = 0;

            let Some(event) = response.event else {
                warn!("Received watch response without event, skipping");
                continue;
            };

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(()),
                _ = self.shutdown.cancelled() => return Ok(()),
                result = self.sink.send(event) => {
                    if result.is_err() {
                        debug!("Watch receiver dropped, ending subscription task watch");
                        return Ok(());
                    }
                }
            }
        }
    }
}
