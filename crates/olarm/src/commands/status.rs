use olarm_api::{Connection, DeviceApi, DeviceSnapshot};

use crate::error::CliError;

pub async fn run(conn: &Connection, device_id: &str) -> Result<(), CliError> {
    let api = DeviceApi::new(conn.device(device_id));
    let snapshot = api.refresh().await?;
    print_snapshot(&snapshot);
    Ok(())
}

pub fn print_snapshot(snapshot: &DeviceSnapshot) {
    println!("Areas:");
    for area in &snapshot.panel_areas {
        println!("  {:>2}  {:<24} {}", area.area_number, area.name, area.state);
    }

    println!("Zones:");
    for zone in &snapshot.zones {
        println!(
            "  {:>2}  {:<24} {:<4} {}",
            zone.zone_number + 1,
            zone.name,
            zone.state,
            zone.last_changed.as_deref().unwrap_or("-"),
        );
    }

    let bypassed: Vec<_> = snapshot.bypass.iter().filter(|b| b.state.is_on()).collect();
    if !bypassed.is_empty() {
        println!("Bypassed:");
        for zone in bypassed {
            println!("  {:>2}  {}", zone.zone_number + 1, zone.name);
        }
    }

    if !snapshot.pgms.is_empty() {
        println!("PGMs:");
        for pgm in &snapshot.pgms {
            println!(
                "  {:>2}  {:<24} {:<4} enabled={} pulse={}",
                pgm.pgm_number, pgm.name, pgm.state, pgm.enabled, pgm.pulse_capable,
            );
        }
    }

    if !snapshot.utility_keys.is_empty() {
        println!("Utility keys:");
        for key in &snapshot.utility_keys {
            println!("  {:>2}  {:<24} {}", key.key_number, key.name, key.state);
        }
    }
}
