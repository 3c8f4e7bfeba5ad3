use tq_oracle::Oracle;

use crate::settings::Settings;

pub async fn run(settings: &Settings) -> Result<(), String> {
    let oracle = settings.oracle()?;
    let item = oracle
        .select_secret_item()
        .await
        .map_err(|e| e.to_string())?;
    println!("{item}");
    Ok(())
}
