// Device facade: one fetch, every decoder, plus the control verbs.
//
// This is the surface a host integration consumes. `refresh` performs a
// single device-state request and runs all decoders over the same
// payload; the decoders never make network calls of their own.

use crate::action::Action;
use crate::client::DeviceClient;
use crate::decode;
use crate::error::Error;
use crate::models::{AuthCheck, ChangeRecord, DeviceSnapshot};

/// High-level API for one panel: decoded state plus control actions.
#[derive(Debug, Clone)]
pub struct DeviceApi {
    client: DeviceClient,
}

impl DeviceApi {
    pub fn new(client: DeviceClient) -> Self {
        Self { client }
    }

    /// The underlying request client.
    pub fn client(&self) -> &DeviceClient {
        &self.client
    }

    /// Fetch fresh device state and decode every record list from it.
    ///
    /// Records are recomputed from scratch on every call; callers replace
    /// their previous snapshot wholesale.
    pub async fn refresh(&self) -> Result<DeviceSnapshot, Error> {
        let raw = self.client.device_state().await?;

        Ok(DeviceSnapshot {
            zones: decode::zone_records(&raw),
            bypass: decode::bypass_records(&raw),
            panel_areas: decode::panel_area_records(&raw),
            pgms: decode::pgm_records(&raw),
            utility_keys: decode::utility_key_records(&raw),
            triggers: decode::alarm_triggers(&raw),
        })
    }

    /// Whether the credential works at all, expressed as data rather than
    /// an error: hosts use this during setup to flag a bad key.
    pub async fn check_credentials(&self) -> AuthCheck {
        match self.client.device_state().await {
            Ok(_) => AuthCheck { success: true, error: None },
            Err(e) => AuthCheck {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Who last changed `area`'s arm state, best-effort.
    pub async fn changed_by(&self, area: u32) -> ChangeRecord {
        self.client.last_change(area).await
    }

    /// Send any control action.
    pub async fn perform(&self, action: &Action) -> bool {
        self.client.send_action(action).await
    }

    // ── Per-verb conveniences ────────────────────────────────────────

    pub async fn arm_area(&self, area: u32) -> bool {
        self.perform(&Action::arm(area)).await
    }

    pub async fn stay_area(&self, area: u32) -> bool {
        self.perform(&Action::stay(area)).await
    }

    pub async fn sleep_area(&self, area: u32) -> bool {
        self.perform(&Action::sleep(area)).await
    }

    pub async fn disarm_area(&self, area: u32) -> bool {
        self.perform(&Action::disarm(area)).await
    }

    pub async fn bypass_zone(&self, zone: u32) -> bool {
        self.perform(&Action::bypass(zone)).await
    }

    pub async fn open_pgm(&self, pgm: u32) -> bool {
        self.perform(&Action::pgm_open(pgm)).await
    }

    pub async fn close_pgm(&self, pgm: u32) -> bool {
        self.perform(&Action::pgm_close(pgm)).await
    }

    pub async fn pulse_pgm(&self, pgm: u32) -> bool {
        self.perform(&Action::pgm_pulse(pgm)).await
    }

    pub async fn activate_ukey(&self, key: u32) -> bool {
        self.perform(&Action::ukey_activate(key)).await
    }
}

impl From<DeviceClient> for DeviceApi {
    fn from(client: DeviceClient) -> Self {
        Self::new(client)
    }
}
