use crate::reports;
use stitchquote::error::QuoteResult;
use stitchquote::rates::RateTable;

pub fn run(rates: &RateTable, json: bool) -> QuoteResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rates.effective())?);
    } else {
        reports::print_rates(rates);
    }
    Ok(())
}
