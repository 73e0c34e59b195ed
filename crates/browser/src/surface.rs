//! Desktop stand-in for the platform's embedded browser.
//!
//! Owns the history list and hands page fetching to the loader runtime over
//! the bus. Every fetch gets a fresh generation id; starting a new one cancels
//! the previous, and `is_current` lets the owner drop late events.
//!
//! The loader never follows redirects itself. The owner decides per hop and
//! calls `follow_redirect`, which keeps the hop on the same history entry.

use app_api::BrowserSurface;
use bus::{CoreCommand, PageSummary};
use core_types::RequestId;
use log::debug;
use std::sync::mpsc;

const MAX_REDIRECTS: u8 = 10;

#[derive(Default)]
pub struct HistorySurface {
    history: Vec<String>,
    history_index: usize,
    nav_gen: RequestId,
    redirect_hops: u8,
    page: Option<PageSummary>,
    cmd_tx: Option<mpsc::Sender<CoreCommand>>,
}

impl HistorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bus_sender(tx: mpsc::Sender<CoreCommand>) -> Self {
        let mut surface = Self::new();
        surface.set_bus_sender(tx);
        surface
    }

    // -- Setup Methods ---
    pub fn set_bus_sender(&mut self, tx: mpsc::Sender<CoreCommand>) {
        self.cmd_tx = Some(tx);
    }

    pub fn is_current(&self, request_id: RequestId) -> bool {
        self.nav_gen > 0 && request_id == self.nav_gen
    }

    /// Summary of the page currently shown, once it finished loading.
    pub fn page(&self) -> Option<&PageSummary> {
        self.page.as_ref()
    }

    /// Record the loaded page.
    pub fn on_page_loaded(&mut self, request_id: RequestId, page: PageSummary) {
        if self.is_current(request_id) {
            self.page = Some(page);
        }
    }

    /// Continue a redirected fetch at `location`, replacing the current
    /// history entry. Returns false once the hop limit is reached.
    pub fn follow_redirect(&mut self, location: &str) -> bool {
        if self.redirect_hops >= MAX_REDIRECTS {
            debug!("redirect limit reached at {location}");
            return false;
        }
        self.redirect_hops += 1;

        if let Some(entry) = self.history.get_mut(self.history_index) {
            debug!("redirected: {entry} -> {location}");
            *entry = location.to_string();
        }
        self.start_fetch(location.to_string());
        true
    }

    // -- Internal Helpers ---
    fn start_fetch(&mut self, url: String) {
        self.cancel_in_flight();
        self.nav_gen = self.nav_gen.wrapping_add(1);
        self.page = None;

        self.send_cmd(CoreCommand::FetchPage {
            request_id: self.nav_gen,
            url,
        });
    }

    fn load_current(&mut self) {
        // do NOT touch history; just fetch the entry at the cursor
        if let Some(url) = self.history.get(self.history_index).cloned() {
            self.redirect_hops = 0;
            self.start_fetch(url);
        }
    }

    fn cancel_in_flight(&self) {
        if self.nav_gen > 0 {
            self.send_cmd(CoreCommand::CancelRequest {
                request_id: self.nav_gen,
            });
        }
    }

    fn send_cmd(&self, cmd: CoreCommand) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(cmd);
        }
    }
}

impl BrowserSurface for HistorySurface {
    fn load(&mut self, address: &str) {
        // record to history (truncate forward branch)
        if !self.history.is_empty() {
            self.history.truncate(self.history_index + 1);
        }
        self.history.push(address.to_string());
        self.history_index = self.history.len() - 1;

        self.redirect_hops = 0;
        self.start_fetch(address.to_string());
    }

    fn reload(&mut self) {
        self.load_current();
    }

    fn step_back(&mut self) {
        if self.can_step_back() {
            self.history_index -= 1;
            self.load_current();
        }
    }

    fn step_forward(&mut self) {
        if self.can_step_forward() {
            self.history_index += 1;
            self.load_current();
        }
    }

    fn can_step_back(&self) -> bool {
        self.history_index > 0
    }

    fn can_step_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    fn current_address(&self) -> Option<&str> {
        self.history.get(self.history_index).map(String::as_str)
    }

    fn release(&mut self) {
        self.cancel_in_flight();
        self.cmd_tx = None;
    }
}

impl Drop for HistorySurface {
    fn drop(&mut self) {
        self.release();
    }
}
