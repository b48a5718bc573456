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

use crate::ConfigurationError;

/// Errors surfaced by `SubscriptionTaskClient` operations.
///
/// `NotFound` and `Transport` are kept apart so callers can tell "absent" from "unreachable".
/// No operation retries; recovery is up to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Transport security material could not be obtained
    #[error("Credential error: {0}")]
    Credential(String),

    /// The channel to the destination could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service knows no task with the contained ID
    #[error("Subscription task not found: {0}")]
    NotFound(String),

    /// Any channel-level failure, including deadlines and cancellation
    #[error("Transport error: {0}")]
    Transport(tonic::Status),

    #[error("Client has been closed")]
    Closed,
}

impl ClientError {
    pub fn credential<T>(message: T) -> ClientError
    where
        T: Into<String>,
    {
        ClientError::Credential(message.into())
    }

    pub fn connection<T>(message: T) -> ClientError
    where
        T: Into<String>,
    {
        ClientError::Connection(message.into())
    }
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        ClientError::Transport(status)
    }
}
