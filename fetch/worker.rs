/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Dedicated fetch thread.
//!
//! Markup retrieval must never block the host's event thread, so requests
//! are handed to a worker over a command channel and completions come back
//! over another. The host drains completions in its event loop and feeds
//! them to the controller.

use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{trace, warn};
use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use url::Url;

use crate::fetch::{FetchCompletion, FetchError, FetchRequest, PageFetcher};

#[derive(Debug)]
pub enum FetchCommand {
    Fetch(FetchRequest),
    Shutdown,
}

pub struct FetchWorker {
    command_tx: Sender<FetchCommand>,
    completion_rx: Receiver<FetchCompletion>,
    join: Option<JoinHandle<()>>,
}

impl FetchWorker {
    pub fn spawn(timeout: Duration) -> Self {
        let (command_tx, command_rx) = unbounded();
        let (completion_tx, completion_rx) = unbounded();
        let join = std::thread::Builder::new()
            .name("orrery-fetch".to_string())
            .spawn(move || run(command_rx, completion_tx, timeout))
            .expect("fetch worker thread should spawn");
        Self {
            command_tx,
            completion_rx,
            join: Some(join),
        }
    }

    /// Cloneable handle the controller uses to start fetches.
    pub fn fetcher(&self) -> WorkerFetcher {
        WorkerFetcher {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Drain whatever completions have arrived without blocking.
    pub fn try_completions(&self) -> Vec<FetchCompletion> {
        self.completion_rx.try_iter().collect()
    }

    pub fn completion_rx(&self) -> &Receiver<FetchCompletion> {
        &self.completion_rx
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        let _ = self.command_tx.send(FetchCommand::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

#[derive(Clone)]
pub struct WorkerFetcher {
    command_tx: Sender<FetchCommand>,
}

impl PageFetcher for WorkerFetcher {
    fn begin(&mut self, request: FetchRequest) {
        if self.command_tx.send(FetchCommand::Fetch(request)).is_err() {
            warn!("fetch worker is gone; dropping fetch request");
        }
    }
}

fn run(commands: Receiver<FetchCommand>, completions: Sender<FetchCompletion>, timeout: Duration) {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .expect("reqwest blocking client should build");

    while let Ok(command) = commands.recv() {
        match command {
            FetchCommand::Shutdown => break,
            FetchCommand::Fetch(request) => {
                trace!("fetching {} (request {})", request.url, request.id);
                let result = fetch_markup(&client, &request.url);
                if completions
                    .send(FetchCompletion {
                        id: request.id,
                        result,
                    })
                    .is_err()
                {
                    // Receiver dropped: the page session is over.
                    break;
                }
            },
        }
    }
}

/// Same-origin GET with intermediary caching disabled. Non-success statuses
/// and transport failures are both fetch failures; the caller does not
/// distinguish them.
pub fn fetch_markup(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .map_err(|e| FetchError::Network(format!("{e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }
    response
        .text()
        .map_err(|e| FetchError::Network(format!("{e}")))
}
