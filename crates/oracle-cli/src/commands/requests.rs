//! Requests command implementation.

use oracle_store::all_requests;

use crate::commands::open_store;
use crate::output;

pub fn run(store: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&store)?;
    let requests = all_requests(&store)?;

    if !json {
        output::print_request_header();
    }

    for request in &requests {
        if json {
            println!("{}", serde_json::to_string(request)?);
        } else {
            println!("{}", output::format_request_row(request));
        }
    }

    Ok(())
}
