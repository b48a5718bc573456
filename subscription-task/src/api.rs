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

//! Wire messages and gRPC stub for the `onos.e2sub.task` API package.
//!
//! These mirror the service's protobuf schema field-for-field, so they are kept
//! in the shape prost/tonic code generation would produce. Identifier fields are
//! plain strings on the wire; an empty string means "unset".

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

/// Lifecycle phase of a subscription task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Phase {
    Open = 0,
    Close = 1,
}

/// Progress of a subscription task within its current phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Status {
    Pending = 0,
    Complete = 1,
    Failed = 2,
}

/// Kind of change reported by a watch `Event`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EventType {
    None = 0,
    Added = 1,
    Removed = 2,
    Updated = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Lifecycle {
    #[prost(enumeration = "Phase", tag = "1")]
    pub phase: i32,
    #[prost(enumeration = "Status", tag = "2")]
    pub status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscriptionTask {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub revision: u64,
    #[prost(string, tag = "3")]
    pub subscription_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub endpoint_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub lifecycle: ::core::option::Option<Lifecycle>,
}

/// A change to a subscription task, as pushed by the service over a watch stream
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(enumeration = "EventType", tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub task: ::core::option::Option<SubscriptionTask>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSubscriptionTaskRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSubscriptionTaskResponse {
    #[prost(message, optional, tag = "1")]
    pub task: ::core::option::Option<SubscriptionTask>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSubscriptionTasksRequest {
    #[prost(string, tag = "1")]
    pub subscription_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub endpoint_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSubscriptionTasksResponse {
    #[prost(message, repeated, tag = "1")]
    pub tasks: ::prost::alloc::vec::Vec<SubscriptionTask>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WatchSubscriptionTasksRequest {
    #[prost(string, tag = "1")]
    pub subscription_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub endpoint_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "3")]
    pub noreplay: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WatchSubscriptionTasksResponse {
    #[prost(message, optional, tag = "1")]
    pub event: ::core::option::Option<Event>,
}

const GET_SUBSCRIPTION_TASK_PATH: &str =
    "/onos.e2sub.task.E2SubscriptionTaskService/GetSubscriptionTask";
const LIST_SUBSCRIPTION_TASKS_PATH: &str =
    "/onos.e2sub.task.E2SubscriptionTaskService/ListSubscriptionTasks";
const WATCH_SUBSCRIPTION_TASKS_PATH: &str =
    "/onos.e2sub.task.E2SubscriptionTaskService/WatchSubscriptionTasks";

/// gRPC stub for `onos.e2sub.task.E2SubscriptionTaskService`, bound to a tonic `Channel`.
///
/// Cloning is cheap and clones share the underlying connection.
#[derive(Debug, Clone)]
pub struct E2SubscriptionTaskServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl E2SubscriptionTaskServiceClient {
    pub fn new(channel: Channel) -> Self {
        E2SubscriptionTaskServiceClient {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn ready(&mut self) -> Result<(), tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))
    }

    pub async fn get_subscription_task(
        &mut self,
        request: impl tonic::IntoRequest<GetSubscriptionTaskRequest>,
    ) -> Result<tonic::Response<GetSubscriptionTaskResponse>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(GET_SUBSCRIPTION_TASK_PATH);
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn list_subscription_tasks(
        &mut self,
        request: impl tonic::IntoRequest<ListSubscriptionTasksRequest>,
    ) -> Result<tonic::Response<ListSubscriptionTasksResponse>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(LIST_SUBSCRIPTION_TASKS_PATH);
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn watch_subscription_tasks(
        &mut self,
        request: impl tonic::IntoRequest<WatchSubscriptionTasksRequest>,
    ) -> Result<
        tonic::Response<tonic::codec::Streaming<WatchSubscriptionTasksResponse>>,
        tonic::Status,
    > {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(WATCH_SUBSCRIPTION_TASKS_PATH);
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn test_unset_filters_encode_to_empty_message() {
        let request = ListSubscriptionTasksRequest::default();
        assert!(request.encode_to_vec().is_empty());
    }

    #[test]
    fn test_event_decodes_type_and_task() {
        let event = Event {
            r#type: EventType::Updated.into(),
            task: Some(SubscriptionTask {
                id: String::from("task-1"),
                revision: 7,
                subscription_id: String::from("sub-1"),
                endpoint_id: String::from("ep-1"),
                lifecycle: Some(Lifecycle {
                    phase: Phase::Close.into(),
                    status: Status::Failed.into(),
                }),
            }),
        };
        let bytes = WatchSubscriptionTasksResponse {
            event: Some(event.clone()),
        }
        .encode_to_vec();

        let decoded = WatchSubscriptionTasksResponse::decode(bytes.as_slice()).unwrap();
        let decoded_event = decoded.event.unwrap();
        assert_eq!(decoded_event.r#type(), EventType::Updated);
        let lifecycle = decoded_event.task.clone().unwrap().lifecycle.unwrap();
        assert_eq!(lifecycle.phase(), Phase::Close);
        assert_eq!(lifecycle.status(), Status::Failed);
        assert_eq!(decoded_event, event);
    }
}
