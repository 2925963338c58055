use olarm_api::{Connection, DeviceApi};

use crate::error::CliError;

/// Verify the credential: list devices, then run a credential check
/// against the first one.
pub async fn run(conn: &Connection) -> Result<(), CliError> {
    let devices = conn.list_devices().await?;
    println!("API key accepted; {} device(s) visible.", devices.len());

    if let Some(first) = devices.first() {
        let api = DeviceApi::new(conn.device_named(&first.device_id, first.display_name()));
        let check = api.check_credentials().await;
        if check.success {
            println!("Device fetch OK for {}.", first.display_name());
        } else {
            println!(
                "Device fetch failed for {}: {}",
                first.display_name(),
                check.error.unwrap_or_else(|| "unknown error".into()),
            );
        }
    }

    Ok(())
}
