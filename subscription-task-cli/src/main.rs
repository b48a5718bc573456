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

use clap::{Parser, Subcommand};
use clap_num::number_range;
use log::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::{signal, sync::mpsc};
use tokio_util::sync::CancellationToken;

use subscription_task::{
    api::SubscriptionTask, with_endpoint_id, with_subscription_id, ClientConfiguration,
    ClientError, ConfigurationError, CredentialProvider, Destination, FileCredentialProvider,
    FilterOption, GrpcConnector, InsecureCredentialProvider, SubscriptionTaskClient,
};

fn between_1_and_1024(s: &str) -> Result<usize, String> {
    number_range(s, 1, 1024)
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Only include tasks of this subscription
    #[arg(long)]
    subscription_id: Option<String>,

    /// Only include tasks of this endpoint
    #[arg(long)]
    endpoint_id: Option<String>,
}

impl FilterArgs {
    fn options(&self) -> Vec<FilterOption> {
        let mut options = Vec::new();
        if let Some(id) = &self.subscription_id {
            options.push(with_subscription_id(id.as_str()));
        }
        if let Some(id) = &self.endpoint_id {
            options.push(with_endpoint_id(id.as_str()));
        }
        options
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a single subscription task
    Get {
        /// ID of the subscription task
        id: String,
    },
    /// List subscription tasks
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print subscription task changes until interrupted
    Watch {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of events buffered between stream and output - minimum 1, maximum 1024
        #[arg(short, long, default_value_t = 16, value_parser=between_1_and_1024)]
        buffer: usize,
    },
}

// All our args
#[derive(Parser, Debug)]
#[command(version, about = "Client for the E2 subscription task service.", long_about = None)]
pub(crate) struct Args {
    /// Address of the subscription task service; may be repeated, only the first one is connected to
    #[arg(short, long = "address", required = true, env = "E2SUB_ADDRESS")]
    addresses: Vec<String>,

    /// Directory holding tls.cacrt, tls.crt and tls.key
    #[arg(short, long)]
    cert_dir: Option<PathBuf>,

    /// Server name to verify the service certificate against
    #[arg(long)]
    domain_name: Option<String>,

    /// Connect without TLS
    #[arg(long, default_value_t = false)]
    insecure: bool,

    /// Deadline for get and list calls, in milliseconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Increase verbosity of output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Setup logging, get configuration
    std::env::set_var("RUST_LOG", "info");
    if args.verbose {
        std::env::set_var("RUST_LOG", "trace,h2=info,hyper=info,tower=info");
    }
    subscription_task::init_once();

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let config = config_from_args(&args)?;

    let credential_provider: Box<dyn CredentialProvider> = if args.insecure {
        Box::new(InsecureCredentialProvider)
    } else {
        let provider = FileCredentialProvider::new(config.cert_dir.clone());
        match &args.domain_name {
            Some(domain_name) => Box::new(provider.with_domain_name(domain_name)),
            None => Box::new(provider),
        }
    };
    let connector = GrpcConnector::new(config.connect_timeout);

    let client =
        SubscriptionTaskClient::connect_with(config, credential_provider.as_ref(), &connector)
            .await?;

    let result = match &args.command {
        Command::Get { id } => client.get(id.as_str()).await.map(|task| {
            println!("{}", describe(&task));
        }),
        Command::List { filters } => client.list(&filters.options()).await.map(|tasks| {
            for task in &tasks {
                println!("{}", describe(task));
            }
        }),
        Command::Watch { filters, buffer } => watch(&client, filters, *buffer).await,
    };

    client.close().await?;
    result
}

async fn watch(
    client: &SubscriptionTaskClient,
    filters: &FilterArgs,
    buffer: usize,
) -> Result<(), ClientError> {
    let cancel = CancellationToken::new();
    let (sink, mut events) = mpsc::channel(buffer);

    let relay = client
        .watch(cancel.clone(), sink, &filters.options())
        .await?;
    info!("Watching subscription task changes, press ctrl-c to stop");

    let cancel_cloned = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Stopping subscription task watch");
        }
        cancel_cloned.cancel();
    });

    while let Some(event) = events.recv().await {
        match event.task.as_ref() {
            Some(task) => println!("{:?}\t{}", event.r#type(), describe(task)),
            None => println!("{:?}", event.r#type()),
        }
    }

    if let Err(e) = relay.await {
        error!("Watch relay task failed: {e}");
    }
    Ok(())
}

fn describe(task: &SubscriptionTask) -> String {
    let (phase, status) = task
        .lifecycle
        .as_ref()
        .map(|lifecycle| {
            (
                format!("{:?}", lifecycle.phase()),
                format!("{:?}", lifecycle.status()),
            )
        })
        .unwrap_or_default();

    format!(
        "id={} revision={} subscription={} endpoint={} phase={} status={}",
        task.id, task.revision, task.subscription_id, task.endpoint_id, phase, status
    )
}

fn config_from_args(args: &Args) -> Result<Arc<ClientConfiguration>, ConfigurationError> {
    let addresses = args
        .addresses
        .iter()
        .map(|address| address.trim().to_string())
        .collect::<Vec<_>>();

    ClientConfiguration::create(
        Destination::new(addresses),
        args.cert_dir.clone(),
        None,
        args.timeout.map(Duration::from_millis),
        None,
    )
}
