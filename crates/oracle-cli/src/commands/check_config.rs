//! Check-config command implementation.

use oracle_node::NodeConfig;

pub fn run(config: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = NodeConfig::load_from_file(&config)
        .map_err(|e| format!("Invalid configuration {}: {}", config, e))?;

    println!("store:      {}", config.store_path.display());
    println!("ledger:     {}", config.ledger_key);
    println!(
        "token:      {} ({} decimals, {})",
        config.token.symbol, config.token.decimals, config.token.contract_id
    );
    println!("max stake:  {}", config.stake.max_stake_amount);
    println!("divider:    {}", config.stake.balance_divider);

    Ok(())
}
