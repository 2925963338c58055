use tabled::{Table, Tabled, settings::Style};

use olarm_api::{Connection, DeviceSummary};

use crate::error::CliError;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device ID")]
    device_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Alarm Type")]
    alarm_type: String,
}

impl From<&DeviceSummary> for DeviceRow {
    fn from(d: &DeviceSummary) -> Self {
        Self {
            device_id: d.device_id.clone(),
            name: d.device_name.as_deref().unwrap_or("-").to_owned(),
            status: d.device_status.as_deref().unwrap_or("-").to_owned(),
            alarm_type: d.device_alarm_type.as_deref().unwrap_or("-").to_owned(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn run(conn: &Connection) -> Result<(), CliError> {
    let devices = conn.list_devices().await?;

    if devices.is_empty() {
        println!("No devices visible to this API key.");
        return Ok(());
    }

    let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: Option<&str>) -> DeviceSummary {
        DeviceSummary {
            device_id: id.to_owned(),
            device_name: name.map(str::to_owned),
            device_serial: None,
            device_alarm_type: Some("paradox".to_owned()),
            device_status: Some("online".to_owned()),
        }
    }

    #[test]
    fn row_fills_gaps_with_dashes() {
        let row = DeviceRow::from(&summary("dev-2", None));
        assert_eq!(row.device_id, "dev-2");
        assert_eq!(row.name, "-");
        assert_eq!(row.status, "online");
    }

    #[test]
    fn table_carries_headers_and_values() {
        let rows = vec![DeviceRow::from(&summary("dev-1", Some("House Panel")))];
        let table = Table::new(rows).with(Style::rounded()).to_string();

        assert!(table.contains("Device ID"));
        assert!(table.contains("Alarm Type"));
        assert!(table.contains("House Panel"));
        assert!(table.contains("paradox"));
    }
}
