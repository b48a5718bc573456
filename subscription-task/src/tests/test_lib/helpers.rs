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

use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    Event, EventType, Lifecycle, Phase, Status, SubscriptionTask, WatchSubscriptionTasksResponse,
};
use crate::{ClientConfiguration, Destination, SubscriptionTaskClient, SubscriptionTaskTransport};

pub(crate) const PRIMARY_ADDRESS: &str = "onos-e2sub:5150";
pub(crate) const SECONDARY_ADDRESS: &str = "onos-e2sub-standby:5150";

// Upper bound for anything a test awaits, so that a broken relay fails the test instead of hanging it
pub(crate) const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn destination() -> Destination {
    Destination::new([PRIMARY_ADDRESS, SECONDARY_ADDRESS])
}

pub(crate) fn config(
    request_timeout: Option<Duration>,
    max_consecutive_watch_errors: Option<usize>,
) -> Arc<ClientConfiguration> {
    ClientConfiguration::create(
        destination(),
        None,
        None,
        request_timeout,
        max_consecutive_watch_errors,
    )
    .unwrap()
}

pub(crate) fn client_for(transport: impl SubscriptionTaskTransport + 'static) -> SubscriptionTaskClient {
    SubscriptionTaskClient::with_transport(config(None, None), Arc::new(transport))
}

pub(crate) fn task(id: &str, subscription_id: &str, endpoint_id: &str) -> SubscriptionTask {
    SubscriptionTask {
        id: id.to_string(),
        revision: 1,
        subscription_id: subscription_id.to_string(),
        endpoint_id: endpoint_id.to_string(),
        lifecycle: Some(Lifecycle {
            phase: Phase::Open.into(),
            status: Status::Pending.into(),
        }),
    }
}

pub(crate) fn event(event_type: EventType, task_id: &str) -> Event {
    Event {
        r#type: event_type.into(),
        task: Some(task(task_id, "sub-1", "ep-1")),
    }
}

pub(crate) fn watch_response(event: Event) -> WatchSubscriptionTasksResponse {
    WatchSubscriptionTasksResponse { event: Some(event) }
}
