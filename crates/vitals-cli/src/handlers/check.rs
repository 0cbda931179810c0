use crate::output::{OutputMode, print_json};
use anyhow::Result;
use vitals_runtime::HealthCheck;

pub async fn handle(check: &HealthCheck, mode: OutputMode) -> Result<i32> {
    let report = check.run().await;
    print_json(&report, mode)?;
    Ok(report.exit_code())
}
