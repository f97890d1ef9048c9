use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;
use crate::stub::{load_fixture, serve};

/// Starts the development analysis service.
pub async fn run(config: &Config, port: Option<u16>) -> Result<()> {
    let fixture = match &config.stub_result_path {
        Some(path) => {
            let fixture = load_fixture(path)?;
            info!("Serving advice fixture from {}", path.display());
            Some(fixture)
        }
        None => {
            info!("No STUB_RESULT_PATH set; serving placeholder advice");
            None
        }
    };

    serve(AppState::with_fixture(fixture), port.unwrap_or(config.stub_port)).await
}
