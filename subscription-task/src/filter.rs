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

use crate::api::{ListSubscriptionTasksRequest, WatchSubscriptionTasksRequest};
use crate::types::{EndpointId, SubscriptionId};

/// Optional narrowing of `list` and `watch` results; an unset criterion matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub subscription_id: Option<SubscriptionId>,
    pub endpoint_id: Option<EndpointId>,
}

/// A single filter setting, applicable to both `list` and `watch` calls
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOption {
    SubscriptionId(SubscriptionId),
    EndpointId(EndpointId),
}

/// Option for filtering `list` calls
pub type ListOption = FilterOption;
/// Option for filtering `watch` calls
pub type WatchOption = FilterOption;

/// Create an option for filtering by subscription ID
pub fn with_subscription_id<T>(id: T) -> FilterOption
where
    T: Into<SubscriptionId>,
{
    FilterOption::SubscriptionId(id.into())
}

/// Create an option for filtering by endpoint ID
pub fn with_endpoint_id<T>(id: T) -> FilterOption
where
    T: Into<EndpointId>,
{
    FilterOption::EndpointId(id.into())
}

impl FilterOption {
    pub fn apply(&self, criteria: FilterCriteria) -> FilterCriteria {
        match self {
            FilterOption::SubscriptionId(id) => FilterCriteria {
                subscription_id: Some(id.clone()),
                ..criteria
            },
            FilterOption::EndpointId(id) => FilterCriteria {
                endpoint_id: Some(id.clone()),
                ..criteria
            },
        }
    }
}

impl FilterCriteria {
    /// Fold `options` left to right; the last option targeting a field wins.
    pub fn from_options(options: &[FilterOption]) -> FilterCriteria {
        options
            .iter()
            .fold(FilterCriteria::default(), |criteria, option| {
                option.apply(criteria)
            })
    }

    fn wire_fields(self) -> (String, String) {
        (
            self.subscription_id
                .map(SubscriptionId::into_inner)
                .unwrap_or_default(),
            self.endpoint_id
                .map(EndpointId::into_inner)
                .unwrap_or_default(),
        )
    }
}

impl From<FilterCriteria> for ListSubscriptionTasksRequest {
    fn from(criteria: FilterCriteria) -> Self {
        let (subscription_id, endpoint_id) = criteria.wire_fields();
        ListSubscriptionTasksRequest {
            subscription_id,
            endpoint_id,
        }
    }
}

impl From<FilterCriteria> for WatchSubscriptionTasksRequest {
    fn from(criteria: FilterCriteria) -> Self {
        let (subscription_id, endpoint_id) = criteria.wire_fields();
        WatchSubscriptionTasksRequest {
            subscription_id,
            endpoint_id,
            ..Default::default()
        }
    }
}
