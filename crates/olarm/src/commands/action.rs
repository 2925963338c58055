use olarm_api::{Connection, DeviceApi};

use crate::cli::{Command, PgmVerb};
use crate::error::CliError;

/// Dispatch one control action and map the boolean result to an exit
/// status.
pub async fn run(conn: &Connection, cmd: Command) -> Result<(), CliError> {
    let (device_id, label, ok) = match cmd {
        Command::Arm { device_id, area } => {
            let ok = api(conn, &device_id).arm_area(area).await;
            (device_id, format!("arm area {area}"), ok)
        }
        Command::Stay { device_id, area } => {
            let ok = api(conn, &device_id).stay_area(area).await;
            (device_id, format!("stay area {area}"), ok)
        }
        Command::Sleep { device_id, area } => {
            let ok = api(conn, &device_id).sleep_area(area).await;
            (device_id, format!("sleep area {area}"), ok)
        }
        Command::Disarm { device_id, area } => {
            let ok = api(conn, &device_id).disarm_area(area).await;
            (device_id, format!("disarm area {area}"), ok)
        }
        Command::Bypass { device_id, zone } => {
            let ok = api(conn, &device_id).bypass_zone(zone).await;
            (device_id, format!("bypass zone {zone}"), ok)
        }
        Command::Pgm { device_id, num, verb } => {
            let client = api(conn, &device_id);
            let ok = match verb {
                PgmVerb::Open => client.open_pgm(num).await,
                PgmVerb::Close => client.close_pgm(num).await,
                PgmVerb::Pulse => client.pulse_pgm(num).await,
            };
            (device_id, format!("{verb:?} PGM {num}").to_lowercase(), ok)
        }
        Command::Ukey { device_id, num } => {
            let ok = api(conn, &device_id).activate_ukey(num).await;
            (device_id, format!("activate ukey {num}"), ok)
        }
        other => unreachable!("non-action command {other:?} routed to action handler"),
    };

    if ok {
        println!("OK: {label} on {device_id}");
        Ok(())
    } else {
        Err(CliError::ActionRejected { action: label })
    }
}

fn api(conn: &Connection, device_id: &str) -> DeviceApi {
    DeviceApi::new(conn.device(device_id))
}
