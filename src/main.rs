use std::path::PathBuf;

use healthpath_lib::bootstrap::{resolve_config, run_app, tracing::init_tracing_subscriber};
use hp_core::ports::AppDirsPort;
use hp_platform::DirsAppDirsAdapter;

const CONFIG_FILE_NAME: &str = "config.toml";

fn main() -> anyhow::Result<()> {
    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs()?;

    // Explicit path from the command line, otherwise `<data root>/config.toml`.
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dirs.app_data_root.join(CONFIG_FILE_NAME));
    let config = resolve_config(Some(config_path), &app_dirs)?;

    let logs_dir = config.log_to_file.then(|| {
        hp_core::app_dirs::AppDirs {
            app_data_root: config.data_dir.clone(),
        }
        .logs_dir()
    });
    init_tracing_subscriber(logs_dir.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_app(config))
}
