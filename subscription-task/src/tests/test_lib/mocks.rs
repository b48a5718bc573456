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
use futures::future;
use mockall::mock;
use std::sync::Arc;
use tonic::Status;

use crate::api::{
    GetSubscriptionTaskRequest, GetSubscriptionTaskResponse, ListSubscriptionTasksRequest,
    ListSubscriptionTasksResponse, WatchSubscriptionTasksRequest,
};
use crate::{
    ClientError, Connector, CredentialProvider, EventStream, SubscriptionTaskTransport,
    TransportCredentials,
};

mock! {
    pub SubscriptionTaskTransportMock {}
    #[async_trait]
    impl SubscriptionTaskTransport for SubscriptionTaskTransportMock {
        async fn get_subscription_task(
            &self,
            request: GetSubscriptionTaskRequest,
        ) -> Result<GetSubscriptionTaskResponse, Status>;

        async fn list_subscription_tasks(
            &self,
            request: ListSubscriptionTasksRequest,
        ) -> Result<ListSubscriptionTasksResponse, Status>;

        async fn watch_subscription_tasks(
            &self,
            request: WatchSubscriptionTasksRequest,
        ) -> Result<EventStream, Status>;
    }
}

mock! {
    pub ConnectorMock {}
    #[async_trait]
    impl Connector for ConnectorMock {
        async fn connect(
            &self,
            address: String,
            credentials: TransportCredentials,
        ) -> Result<Arc<dyn SubscriptionTaskTransport>, ClientError>;
    }
}

mock! {
    pub CredentialProviderMock {}
    impl CredentialProvider for CredentialProviderMock {
        fn client_credentials(&self) -> Result<TransportCredentials, ClientError>;
    }
}

// A service that never answers; every call stays pending until it is dropped
pub(crate) struct SilentTransport;

#[async_trait]
impl SubscriptionTaskTransport for SilentTransport {
    async fn get_subscription_task(
        &self,
        _request: GetSubscriptionTaskRequest,
    ) -> Result<GetSubscriptionTaskResponse, Status> {
        future::pending().await
    }

    async fn list_subscription_tasks(
        &self,
        _request: ListSubscriptionTasksRequest,
    ) -> Result<ListSubscriptionTasksResponse, Status> {
        future::pending().await
    }

    async fn watch_subscription_tasks(
        &self,
        _request: WatchSubscriptionTasksRequest,
    ) -> Result<EventStream, Status> {
        future::pending().await
    }
}
