pub mod config;
pub mod controller;
pub mod host;
pub mod shell;
pub mod surface;

pub use config::ShellConfig;
pub use controller::{FooterAction, FooterButton, FooterStrip, PageController};
pub use host::EguiHost;
pub use shell::{PageScreen, ShellApp};
pub use surface::HistorySurface;
