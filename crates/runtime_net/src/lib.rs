use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, Sender},
};
use std::thread;

use bus::{CoreCommand, CoreEvent};
use core_types::RequestId;
use log::{debug, warn};
use net::{FetchOptions, Fetched, NetError, fetch_page};

/// Serve page loads until the command channel closes. Each fetch runs on its
/// own worker so a slow page never blocks a cancel.
pub fn start_net_runtime(
    cmd_rx: Receiver<CoreCommand>,
    evt_tx: Sender<CoreEvent>,
    options: FetchOptions,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        // one cancel flag per navigation request_id
        let mut cancels: HashMap<RequestId, Arc<AtomicBool>> = HashMap::new();

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::FetchPage { request_id, url } => {
                    let cancel = cancels
                        .entry(request_id)
                        .or_insert_with(|| Arc::new(AtomicBool::new(false)))
                        .clone();
                    let evt_tx = evt_tx.clone();
                    let options = options.clone();
                    thread::spawn(move || run_fetch(request_id, url, cancel, evt_tx, options));
                }
                CoreCommand::CancelRequest { request_id } => {
                    if let Some(flag) = cancels.remove(&request_id) {
                        flag.store(true, Ordering::Release);
                    }
                }
            }
        }
        debug!("net runtime: command channel closed");
    })
}

fn run_fetch(
    request_id: RequestId,
    url: String,
    cancel: Arc<AtomicBool>,
    evt_tx: Sender<CoreEvent>,
    options: FetchOptions,
) {
    let emit = |evt: CoreEvent| {
        if !cancel.load(Ordering::Acquire) {
            let _ = evt_tx.send(evt);
        }
    };

    emit(CoreEvent::NavigationStarted {
        request_id,
        url: url.clone(),
    });

    match fetch_page(&url, &cancel, &options) {
        Ok(Fetched::Page(page)) => emit(CoreEvent::NavigationFinished {
            request_id,
            url: page.final_url.clone(),
            page: Some(page),
        }),
        // the owner either follows with a new request or stops here
        Ok(Fetched::Redirect { location }) => emit(CoreEvent::NavigationRedirected {
            request_id,
            url,
            location,
        }),
        Err(NetError::Cancelled) => {
            debug!("fetch {request_id} cancelled: {url}");
        }
        Err(err) => {
            warn!("fetch {request_id} failed: {err}");
            emit(CoreEvent::NavigationFailed {
                request_id,
                url: url.clone(),
                kind: err.kind(),
                error: err.to_string(),
            });
            // an embedded browser still finishes a page that failed to load
            emit(CoreEvent::NavigationFinished {
                request_id,
                url,
                page: None,
            });
        }
    }
}
