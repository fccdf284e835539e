use crate::utils::logger::info;

pub fn handle_version() -> anyhow::Result<()> {
    info(&format!("pulse CLI version: {}", env!("CARGO_PKG_VERSION")));
    info(&format!("pulse agent version: {}", pulse_agent::VERSION));
    Ok(())
}
