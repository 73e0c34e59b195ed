use browser::{ShellApp, ShellConfig};
use platform::PlatformOptions;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_FILTER: &str = "browser=debug,runtime_net=info,net=info,platform=info,warn";

fn init_logging() {
    // also installs the `log` bridge, so crate-level `log` records show up here
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = ShellConfig::load();
    let target = config.navigation_target();
    log::info!("opening {} ({})", target.address, target.label);

    let options = PlatformOptions {
        width: config.window.width,
        height: config.window.height,
        fetch: config.fetch_options(),
    };
    platform::run(Box::new(ShellApp::new(target)), options)?;
    Ok(())
}
