use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use notify_debouncer_full::{
    new_debouncer, DebouncedEvent,
    notify::{Error as NotifyError, RecursiveMode, Watcher},
};
use tracing::{debug, error, info};

use crate::state::{reload_templates, AppState, RefreshBroadcaster};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(tx): State<RefreshBroadcaster>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, tx))
}

async fn handle_socket(mut socket: WebSocket, tx: RefreshBroadcaster) {
    let mut rx = tx.subscribe();

    if rx.recv().await.is_ok()
        && socket.send(Message::Text("reload".to_string().into())).await.is_err()
    {
        debug!("Client disconnected before reload message could be sent");
    }
}

/// Editor scratch files (Emacs `.#*` locks, `~` backups) never trigger a reload.
fn is_scratch_file(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|s| s.starts_with(".#") || s.ends_with('~'))
}

fn is_relevant(event: &DebouncedEvent) -> bool {
    let kind_matters = event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove();
    kind_matters && !event.event.paths.iter().any(|p| is_scratch_file(p))
}

pub fn start_content_watcher(tx: RefreshBroadcaster, app_state: Arc<AppState>) {
    let content_dir: PathBuf = app_state.content_dir.clone();
    info!(dir = %content_dir.display(), "Starting content watcher for hot-reload...");
    tokio::spawn(async move {
        let (watcher_tx, mut watcher_rx) = tokio::sync::mpsc::channel(1);

        let debouncer = new_debouncer(
            Duration::from_millis(200),
            None,
            move |res: Result<Vec<DebouncedEvent>, Vec<NotifyError>>| match res {
                Ok(events) => {
                    let changed: Vec<_> = events
                        .iter()
                        .filter(|e| is_relevant(e))
                        .flat_map(|e| &e.event.paths)
                        .collect();
                    if !changed.is_empty() {
                        debug!("Relevant file change detected: {:?}", changed);
                        if let Err(e) = watcher_tx.blocking_send(()) {
                            error!("Failed to send watcher event: {}", e);
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        error!("Watcher error: {}", e);
                    }
                }
            },
        );

        let mut debouncer = match debouncer {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create debouncer: {}", e);
                return;
            }
        };

        if let Err(e) = debouncer.watcher().watch(&content_dir, RecursiveMode::Recursive) {
            error!("Failed to watch {}: {}", content_dir.display(), e);
            return;
        }

        while watcher_rx.recv().await.is_some() {
            info!("Content change detected, reloading templates and sending signal...");
            reload_templates(&app_state).await;

            if let Err(e) = tx.send(()) {
                debug!("No browser listening for reload: {}", e);
            }
        }
    });
}
