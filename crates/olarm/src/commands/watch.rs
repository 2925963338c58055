use std::time::Duration;

use tracing::{info, warn};

use olarm_api::{Connection, DeviceApi, MIN_POLL_INTERVAL_SECS};

use crate::commands::status::print_snapshot;
use crate::error::CliError;

/// Poll one device on a fixed cadence until interrupted.
///
/// The interval is clamped to the documented 60-second floor, and the
/// shared limiter's cycle counter is reset at every boundary so one bad
/// cycle's 429 streak cannot suppress all future cycles.
pub async fn run(conn: &Connection, device_id: &str, interval: u64) -> Result<(), CliError> {
    let interval = if interval < MIN_POLL_INTERVAL_SECS {
        warn!(
            requested = interval,
            floor = MIN_POLL_INTERVAL_SECS,
            "interval below the API floor, clamping"
        );
        MIN_POLL_INTERVAL_SECS
    } else {
        interval
    };

    let api = DeviceApi::new(conn.device(device_id));

    loop {
        conn.limiter().reset_cycle();

        match api.refresh().await {
            Ok(snapshot) => {
                println!("── {} ──", chrono::Local::now().format("%a %d %b %Y %H:%M:%S"));
                print_snapshot(&snapshot);

                for area in &snapshot.panel_areas {
                    #[allow(clippy::cast_possible_truncation)]
                    let change = api.changed_by(area.area_number as u32).await;
                    if change.action_created > 0 {
                        println!(
                            "  {} last changed by {} ({})",
                            area.name,
                            change.user_fullname,
                            change.formatted.as_deref().unwrap_or("-"),
                        );
                    }
                }
            }
            Err(e) => {
                // Expected failure modes (rate limit, flaky upstream) are
                // logged and the loop carries on to the next cycle.
                warn!(error = %e, "refresh failed, retrying next cycle");
            }
        }

        info!(interval, "cycle complete, sleeping");
        tokio::select! {
            () = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted, exiting.");
                return Ok(());
            }
        }
    }
}
