use super::{FooterAction, PageController};
use crate::host::EguiHost;
use crate::surface::HistorySurface;
use app_api::{BrowserSurface, NavigationRequest};
use egui::{
    Align2, Button, CentralPanel, Color32, Context, Frame, Margin, RichText, ScrollArea, Sense,
    TopBottomPanel, Window,
};

const MAX_LINKS_SHOWN: usize = 60;

enum PageAction {
    Footer(FooterAction),
    RetryFromErrorPanel,
    FollowLink(String),
    MenuSelected(usize),
    MenuDismissed,
}

impl PageController<HistorySurface, EguiHost> {
    pub fn ui(&mut self, ctx: &Context) {
        self.update_footer();
        if let Some(text) = self.host.take_clipboard_text() {
            ctx.copy_text(text);
        }

        let mut action = None;

        TopBottomPanel::bottom("webview footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let footer = self.footer;
                let buttons = [
                    (footer.back.enabled, "⬅", FooterAction::Back),
                    (footer.forward.enabled, "➡", FooterAction::Forward),
                    (footer.refresh.enabled, "🔄", FooterAction::Refresh),
                    (footer.menu.enabled, "☰", FooterAction::Menu),
                ];
                for (enabled, label, footer_action) in buttons {
                    if ui.add_enabled(enabled, Button::new(label)).clicked() {
                        action = Some(PageAction::Footer(footer_action));
                    }
                }
            });
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.target.label);
            if let Some(address) = self.surface.current_address() {
                ui.weak(address);
            }
            ui.separator();

            if self.is_error_panel_visible() {
                let panel = Frame::new()
                    .fill(ui.visuals().extreme_bg_color)
                    .inner_margin(Margin::symmetric(12, 12))
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        let headline = RichText::new("Unable to load the page.");
                        ui.label(headline.color(Color32::LIGHT_RED));
                        ui.label("Check your connection, then tap here to retry.");
                    });
                if panel.response.interact(Sense::click()).clicked() {
                    action = Some(PageAction::RetryFromErrorPanel);
                }
                return;
            }

            if self.is_progress_visible() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading…");
                });
                return;
            }

            if let Some(page) = self.surface.page() {
                if let Some(title) = &page.title {
                    ui.strong(title);
                }
                ui.label(format!(
                    "HTTP {} • {}",
                    page.status,
                    page.content_type.as_deref().unwrap_or("unknown")
                ));
                ui.separator();
                ScrollArea::vertical().show(ui, |ui| {
                    for link in page.links.iter().take(MAX_LINKS_SHOWN) {
                        if ui.link(link).clicked() {
                            action = Some(PageAction::FollowLink(link.clone()));
                        }
                    }
                });
            }
        });

        if let Some(dialog) = self.host.dialog() {
            let mut open = true;
            Window::new("Menu")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    for (index, item) in dialog.items.iter().enumerate() {
                        if ui.button(item).clicked() {
                            action = Some(PageAction::MenuSelected(index));
                        }
                    }
                });
            if !open {
                action = Some(PageAction::MenuDismissed);
            }
        }

        if let Some(action) = action {
            self.apply_page_action(action);
        }
    }

    fn apply_page_action(&mut self, action: PageAction) {
        match action {
            PageAction::Footer(footer_action) => self.on_footer_action(footer_action),
            PageAction::RetryFromErrorPanel => self.tap_error_panel(),
            PageAction::FollowLink(url) => {
                let request = NavigationRequest::main_frame(url).with_gesture();
                if !self.on_navigation_request(&request) {
                    if let Some(url) = request.url.as_deref() {
                        self.surface.load(url);
                        self.update_footer();
                    }
                }
            }
            PageAction::MenuSelected(index) => {
                self.host.dismiss_dialog();
                self.on_menu_item_selected(index);
            }
            PageAction::MenuDismissed => {
                self.host.dismiss_dialog();
            }
        }
    }
}
