//! Stake-amount command implementation.

use oracle_core::{stake_amount, Amount};
use oracle_node::StakeSettings;

use crate::commands::read_request;

pub fn run(
    request: String,
    balance: String,
    max: String,
    divider: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = read_request(&request)?;
    let balance = Amount::parse(&balance).map_err(|e| format!("Invalid --balance: {}", e))?;
    let settings = StakeSettings {
        max_stake_amount: Amount::parse(&max).map_err(|e| format!("Invalid --max: {}", e))?,
        balance_divider: Amount::parse(&divider)
            .map_err(|e| format!("Invalid --divider: {}", e))?,
    };
    settings.validate()?;

    let amount = stake_amount(
        &request,
        &balance,
        &settings.max_stake_amount,
        &settings.balance_divider,
    );
    println!("{}", amount);

    Ok(())
}
