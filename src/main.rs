use anyhow::{bail, Context, Result};

use swim_result_submit::utils::logging;
use swim_result_submit::{Automation, Config};

/// Run one automation operation against the portal.
///
/// Usage: `swim_result_submit <operation> <request.json>` where operation is
/// `list-sports`, `list-events` or `submit-results`. The response payload is
/// printed to stdout as JSON. `HEADLESS=true` selects the hosted headless
/// strategy.
#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();

    let mut args = std::env::args().skip(1);
    let (Some(operation), Some(request_path)) = (args.next(), args.next()) else {
        bail!("usage: swim_result_submit <list-sports|list-events|submit-results> <request.json>");
    };

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("reading request file {}", request_path))?;

    let automation = Automation::with_default_sink(config);
    let output = match operation.as_str() {
        "list-sports" => {
            let request = serde_json::from_str(&raw).context("parsing list-sports request")?;
            serde_json::to_string_pretty(&automation.list_sports(request).await)?
        }
        "list-events" => {
            let request = serde_json::from_str(&raw).context("parsing list-events request")?;
            serde_json::to_string_pretty(&automation.list_events(request).await)?
        }
        "submit-results" => {
            let request = serde_json::from_str(&raw).context("parsing submit-results request")?;
            serde_json::to_string_pretty(&automation.submit_results(request).await)?
        }
        other => bail!("unknown operation {:?}; expected list-sports, list-events or submit-results", other),
    };

    println!("{}", output);
    Ok(())
}
