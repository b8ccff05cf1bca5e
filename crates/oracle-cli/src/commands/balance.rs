//! Balance command implementation.

use oracle_ledger::Balance;
use serde_json::json;

use crate::commands::open_store;
use crate::output;

pub fn run(store: String, key: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&store)?;

    let mut ledger = Balance::new(key.clone(), "", 0, "");
    if !ledger.restore(&store)? {
        return Err(format!("No ledger stored under '{}'", key).into());
    }

    if json {
        let mut doc = serde_json::to_value(ledger.to_doc())?;
        doc["key"] = json!(ledger.key());
        doc["amountStaked"] = json!(ledger.amount_staked());
        println!("{}", output::format_json(&doc));
        return Ok(());
    }

    println!("key:        {}", ledger.key());
    println!(
        "token:      {} ({} decimals, {})",
        ledger.symbol(),
        ledger.decimals(),
        ledger.contract_id()
    );
    println!("balance:    {}", ledger.balance());
    println!("profit:     {}", ledger.profit());
    println!("staked:     {}", ledger.amount_staked());
    for (request_id, amount) in ledger.stakes() {
        println!("  {:<40} {}", request_id, amount);
    }

    Ok(())
}
