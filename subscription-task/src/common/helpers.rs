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

use log::*;
use std::fmt::Display;
use std::future::Future;
use std::sync::Once;
use tokio::task;
use tokio_util::task::TaskTracker;

static INIT: Once = Once::new();

/// Install `env_logger` as the `log` backend, unless a logger has already been set up
pub fn init_once() {
    INIT.call_once(|| {
        if let Err(e) = env_logger::try_init() {
            debug!("Keeping already installed logger: {e}");
        }
    });
}

// Spawn `fut` onto `tracker`, logging the error it may end with
pub(crate) fn spawn_and_log_error<F, E>(tracker: &TaskTracker, fut: F) -> task::JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display,
{
    tracker.spawn(async move {
        if let Err(e) = fut.await {
            error!("{}", e)
        }
    })
}
