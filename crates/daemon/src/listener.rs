// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accepts connections on the control-surface Unix socket and
//! dispatches each request against one shared [`Engine`] — spec.md
//! §4.H/§6.

use std::sync::Arc;

use tokio::net::{UnixListener, UnixStream};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, warn};

use pm_core::FilterId;
use pm_engine::{Engine, EngineError};
use pm_filters::FilterSetError;

use crate::protocol::{filter_id, ErrorKind, Request, Response, MAX_FILTER_LIST_PAGE};
use crate::protocol_wire::{self, ProtocolError, DEFAULT_TIMEOUT};

/// Shared context every accepted connection dispatches requests
/// against. One value per daemon process — spec.md §9's "one engine
/// value owned by the top-level process" guidance, extended one level
/// up to the process that owns the socket.
pub struct ListenCtx {
    pub engine: Arc<Engine>,
}

pub struct Listener {
    socket: UnixListener,
    ctx: Arc<ListenCtx>,
}

impl Listener {
    pub fn new(socket: UnixListener, ctx: Arc<ListenCtx>) -> Self {
        Self { socket, ctx }
    }

    /// Accepts connections until the socket itself errors out (the
    /// caller owns the socket's lifetime and closes it to stop this
    /// loop — there is no separate shutdown signal in scope here).
    pub async fn run(self) {
        loop {
            match self.socket.accept().await {
                Ok((stream, _addr)) => {
                    let ctx = self.ctx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, ctx).await {
                            debug!(error = %e, "connection closed");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    return;
                }
            }
        }
    }
}

async fn handle_connection(stream: UnixStream, ctx: Arc<ListenCtx>) -> Result<(), ProtocolError> {
    let (mut reader, mut writer): (OwnedReadHalf, OwnedWriteHalf) = stream.into_split();
    loop {
        let request = match protocol_wire::read_request(&mut reader, DEFAULT_TIMEOUT).await {
            Ok(r) => r,
            Err(ProtocolError::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e),
        };
        debug!(?request, "handling request");
        let response = handle_request(&request, &ctx.engine);
        protocol_wire::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
    }
}

/// Dispatches one request into the typed operations `Engine` exposes.
/// Every `Option`/`bool` result the engine already uses for "not
/// found"/"nothing happened" is translated here into the control
/// surface's `NOT_FOUND` — the engine itself never raises that error
/// kind, since it has no notion of the wire protocol.
fn handle_request(request: &Request, engine: &Engine) -> Response {
    match request {
        Request::AlertsQueued => Response::AlertsQueued { queued: engine.alerts_queued() },

        Request::PopAlert => match engine.pop_alert() {
            Some(alert) => Response::PopAlert { alert },
            None => Response::error(ErrorKind::NotFound),
        },

        Request::GetProcesses { skip, max } => Response::Processes { summaries: engine.get_processes(*skip, *max) },

        Request::GetProcessDetailed { pid, epoch_seconds } => {
            let key = Request::lifetime_key(*pid, *epoch_seconds);
            match engine.get_process_detailed(key) {
                Some(detailed) => Response::ProcessDetailed { detailed },
                None => Response::error(ErrorKind::NotFound),
            }
        }

        Request::GetImageDetailed { pid, epoch_seconds, index } => {
            let key = Request::lifetime_key(*pid, *epoch_seconds);
            match engine.get_image_detailed(key, *index) {
                Some(detailed) => Response::ImageDetailed { detailed },
                None => Response::error(ErrorKind::NotFound),
            }
        }

        Request::GetProcessSizes { pid, epoch_seconds } => {
            let key = Request::lifetime_key(*pid, *epoch_seconds);
            match engine.get_process_sizes(key) {
                Some(sizes) => Response::ProcessSizes { sizes },
                None => Response::error(ErrorKind::NotFound),
            }
        }

        Request::AddFilter { kind, ops, pattern } => match engine.add_filter(*kind, pattern, *ops) {
            Ok(id) => Response::FilterAdded { id: id.get() },
            // Teardown returns stay silent per spec.md §7: id 0 is the
            // reserved "no filter was added" sentinel, never an error.
            Err(EngineError::Filter(FilterSetError::TornDown)) => Response::FilterAdded { id: 0 },
            Err(EngineError::Filter(FilterSetError::Entry(_))) => Response::error(ErrorKind::BadData),
        },

        Request::ListFilters { kind, skip } => {
            let entries = engine.list_filters(*kind, *skip, MAX_FILTER_LIST_PAGE);
            Response::Filters { copied: entries.len(), entries }
        }

        Request::DeleteFilter { kind, id } => match filter_id(*id) {
            Ok(id) => delete_filter(engine, *kind, id),
            Err(kind) => Response::error(kind),
        },

        Request::GetGlobalSizes => Response::GlobalSizes { sizes: engine.get_global_sizes() },
    }
}

fn delete_filter(engine: &Engine, kind: pm_core::FilterKind, id: FilterId) -> Response {
    Response::FilterDeleted { deleted: engine.delete_filter(kind, id) }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
