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

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new<T>(id: T) -> $name
            where
                T: Into<String>,
            {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a subscription task; opaque to this client and never validated locally
    SubscriptionTaskId
);
string_id!(
    /// Identifier of an E2 subscription, only used as a filter criterion
    SubscriptionId
);
string_id!(
    /// Identifier of an E2 endpoint, only used as a filter criterion
    EndpointId
);

/// Network addresses by which the subscription task service may be reached.
///
/// Only the first address is ever dialed, there is no failover to the remaining entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub addresses: Vec<String>,
}

impl Destination {
    pub fn new<I, T>(addresses: I) -> Destination
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Destination {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    /// The address a client connects to, `None` for an empty destination
    pub fn primary(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_first_address() {
        let destination = Destination::new(["e2sub:5150", "e2sub-backup:5150"]);
        assert_eq!(destination.primary(), Some("e2sub:5150"));
        assert_eq!(Destination::new(Vec::<String>::new()).primary(), None);
    }

    #[test]
    fn test_ids_are_passed_through_verbatim() {
        let id = SubscriptionTaskId::from(" not/validated ");
        assert_eq!(id.as_str(), " not/validated ");
        assert_eq!(id.to_string(), " not/validated ");
        assert_eq!(SubscriptionId::default().into_inner(), "");
    }
}
