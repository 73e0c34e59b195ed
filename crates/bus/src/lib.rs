use core_types::{ErrorKind, RequestId};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub enum CoreCommand {
    // Page loading
    FetchPage { request_id: RequestId, url: String },
    CancelRequest { request_id: RequestId },
}

/// Links and title pulled out of a loaded page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub links: Vec<String>,
}

#[derive(Debug)]
pub enum CoreEvent {
    // Loader -> UI
    NavigationStarted {
        request_id: RequestId,
        url: String,
    },
    /// The server answered with a redirect; the loader stopped there and
    /// the owner decides whether `location` is fetched next.
    NavigationRedirected {
        request_id: RequestId,
        url: String,
        location: String,
    },
    NavigationFinished {
        request_id: RequestId,
        url: String,
        page: Option<PageSummary>,
    },
    NavigationFailed {
        request_id: RequestId,
        url: String,
        kind: ErrorKind,
        error: String,
    },
}

impl CoreEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            CoreEvent::NavigationStarted { request_id, .. }
            | CoreEvent::NavigationRedirected { request_id, .. }
            | CoreEvent::NavigationFinished { request_id, .. }
            | CoreEvent::NavigationFailed { request_id, .. } => *request_id,
        }
    }
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub cmd_rx: Receiver<CoreCommand>,
    pub evt_tx: Sender<CoreEvent>, // shareable for runtimes
    pub evt_rx: Receiver<CoreEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        Self {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
