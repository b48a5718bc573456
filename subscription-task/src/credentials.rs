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
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ClientError;

/// File name of the CA certificate inside a certificate directory
pub const CA_CERT_FILE: &str = "tls.cacrt";
/// File name of the client certificate inside a certificate directory
pub const CLIENT_CERT_FILE: &str = "tls.crt";
/// File name of the client private key inside a certificate directory
pub const CLIENT_KEY_FILE: &str = "tls.key";

/// PEM encoded client certificate and private key, for mutual TLS
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub certificate: Vec<u8>,
    pub key: Vec<u8>,
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("certificate", &format_args!("{} bytes", self.certificate.len()))
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Security material a connection is established with
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportCredentials {
    /// Plaintext HTTP/2, for development setups only
    Insecure,
    Tls {
        ca_certificate: Vec<u8>,
        identity: Option<ClientIdentity>,
        domain_name: Option<String>,
    },
}

/// Source of transport credentials, queried once per client construction.
pub trait CredentialProvider: Send + Sync {
    fn client_credentials(&self) -> Result<TransportCredentials, ClientError>;
}

/// Loads TLS material from a certificate directory, using the `tls.cacrt`, `tls.crt` and `tls.key` file layout.
///
/// The CA certificate is mandatory. The client identity is optional, but certificate and key have to be present together.
#[derive(Clone, Debug)]
pub struct FileCredentialProvider {
    cert_dir: PathBuf,
    domain_name: Option<String>,
}

impl FileCredentialProvider {
    pub fn new<P>(cert_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        FileCredentialProvider {
            cert_dir: cert_dir.into(),
            domain_name: None,
        }
    }

    /// Verify the server certificate against `domain_name` instead of the dialed host
    pub fn with_domain_name<T>(mut self, domain_name: T) -> Self
    where
        T: Into<String>,
    {
        self.domain_name = Some(domain_name.into());
        self
    }

    fn read_required(&self, file_name: &str) -> Result<Vec<u8>, ClientError> {
        read_pem(&self.cert_dir.join(file_name))?.ok_or_else(|| {
            ClientError::credential(format!(
                "Missing {}",
                self.cert_dir.join(file_name).display()
            ))
        })
    }
}

fn read_pem(path: &Path) -> Result<Option<Vec<u8>>, ClientError> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ClientError::credential(format!(
            "Error reading {}: {e}",
            path.display()
        ))),
    }
}

impl CredentialProvider for FileCredentialProvider {
    fn client_credentials(&self) -> Result<TransportCredentials, ClientError> {
        let ca_certificate = self.read_required(CA_CERT_FILE)?;

        let certificate = read_pem(&self.cert_dir.join(CLIENT_CERT_FILE))?;
        let key = read_pem(&self.cert_dir.join(CLIENT_KEY_FILE))?;
        let identity = match (certificate, key) {
            (Some(certificate), Some(key)) => Some(ClientIdentity { certificate, key }),
            (None, None) => {
                debug!(
                    "No client identity in {}, using server-side TLS only",
                    self.cert_dir.display()
                );
                None
            }
            _ => {
                return Err(ClientError::credential(format!(
                    "{CLIENT_CERT_FILE} and {CLIENT_KEY_FILE} must both be present in {}",
                    self.cert_dir.display()
                )))
            }
        };

        Ok(TransportCredentials::Tls {
            ca_certificate,
            identity,
            domain_name: self.domain_name.clone(),
        })
    }
}

/// Provides plaintext credentials
#[derive(Clone, Copy, Debug, Default)]
pub struct InsecureCredentialProvider;

impl CredentialProvider for InsecureCredentialProvider {
    fn client_credentials(&self) -> Result<TransportCredentials, ClientError> {
        warn!("Using insecure transport credentials");
        Ok(TransportCredentials::Insecure)
    }
}
