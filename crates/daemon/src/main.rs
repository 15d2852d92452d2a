// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PeaceMaker Daemon (pmd)
//!
//! Background process that owns the one [`Engine`] value per spec.md
//! §9's re-architecture guidance, wires it to the production OS-boundary
//! implementations, and serves the control surface on a Unix socket.

mod listener;
mod protocol;
mod protocol_wire;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::UnixListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pm_core::SystemClock;
use pm_engine::Engine;
use pm_history::ProcExeImageResolver;
use pm_persist::JsonFileStore;
use pm_stackwalk::{BacktraceFrameSource, ProcMapsMemoryQuery};

use crate::listener::{ListenCtx, Listener};

const DEFAULT_SOCKET_PATH: &str = "/var/run/peacemaker/control.sock";
const DEFAULT_CONFIG_DIR: &str = "/var/lib/peacemaker";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("pmd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let socket_path = std::env::var("PEACEMAKER_SOCKET").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(DEFAULT_SOCKET_PATH));
    let config_dir = std::env::var("PEACEMAKER_CONFIG_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::create_dir_all(&config_dir)?;
    if socket_path.exists() {
        std::fs::remove_file(&socket_path)?;
    }

    let engine = Arc::new(Engine::new(
        Arc::new(SystemClock),
        Arc::new(JsonFileStore::new(config_dir)),
        Arc::new(BacktraceFrameSource),
        Arc::new(ProcMapsMemoryQuery),
        Arc::new(ProcExeImageResolver),
        Arc::new(ProcExeImageResolver),
    ));
    engine.restore_filters();

    let socket = UnixListener::bind(&socket_path)?;
    info!(socket = %socket_path.display(), "peacemaker daemon listening");

    let ctx = Arc::new(ListenCtx { engine });
    let listener = Listener::new(socket, ctx);

    tokio::select! {
        _ = listener.run() => {
            error!("listener loop exited");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}

fn print_help() {
    println!("pmd {}", env!("CARGO_PKG_VERSION"));
    println!("PeaceMaker Daemon - background endpoint-protection control surface");
    println!();
    println!("USAGE:");
    println!("    pmd");
    println!();
    println!("The daemon listens on a Unix socket (PEACEMAKER_SOCKET, default");
    println!("{DEFAULT_SOCKET_PATH}) for control-surface requests and persists");
    println!("filters under PEACEMAKER_CONFIG_DIR (default {DEFAULT_CONFIG_DIR}).");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}
