use crate::output::{OutputMode, print_json};
use anyhow::Result;
use vitals_runtime::HealthCheck;

pub async fn handle(check: &HealthCheck, mode: OutputMode) -> Result<i32> {
    let diagnosed = check.diagnose().await;
    print_json(&diagnosed, mode)?;
    Ok(diagnosed.exit_code())
}
