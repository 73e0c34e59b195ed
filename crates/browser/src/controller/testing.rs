use super::PageController;
use crate::host::EguiHost;
use crate::surface::HistorySurface;
use bus::CoreCommand;
use core_types::{NavigationTarget, RequestId};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

/// An attached desktop page screen whose loader commands and external
/// launches are captured instead of performed.
pub(super) struct Screen {
    pub controller: PageController<HistorySurface, EguiHost>,
    commands: Receiver<CoreCommand>,
    launches: Rc<RefCell<Vec<String>>>,
}

impl Screen {
    pub fn attached(address: &str) -> Self {
        let (tx, commands) = mpsc::channel();
        let launches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&launches);
        let host = EguiHost::with_launcher(move |address| {
            sink.borrow_mut().push(address.to_string());
            Ok(())
        });

        let mut controller = PageController::new(
            NavigationTarget::new(address, "title"),
            HistorySurface::with_bus_sender(tx),
            host,
        );
        controller.attach();
        Self {
            controller,
            commands,
            launches,
        }
    }

    /// Fetches sent since the last call.
    pub fn fetches(&self) -> Vec<(RequestId, String)> {
        self.commands
            .try_iter()
            .filter_map(|cmd| match cmd {
                CoreCommand::FetchPage { request_id, url } => Some((request_id, url)),
                CoreCommand::CancelRequest { .. } => None,
            })
            .collect()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches().into_iter().map(|(_, url)| url).collect()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launches.borrow().clone()
    }
}
