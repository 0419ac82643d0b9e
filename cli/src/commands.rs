//! Subcommand execution.

use ratepath_fx::{FxEngine, FxError, FxResult};
use serde_json::{json, Value};

use crate::Command;

/// Run one subcommand and render its result as JSON.
pub async fn run(engine: &FxEngine, command: Command) -> FxResult<Value> {
    match command {
        Command::Currencies => {
            let currencies = engine.get_all_currencies().await?;
            Ok(json!(currencies))
        }
        Command::Exchanges => {
            let edges = engine.get_all_exchanges().await?;
            Ok(json!(edges))
        }
        Command::Convert { from, to, amount } => {
            let conversion = engine.convert_detailed(&from, &to, amount).await?;
            Ok(json!({
                "from": conversion.from,
                "to": conversion.to,
                "amount": conversion.amount,
                "result": conversion.result(),
                "steps": conversion.steps,
            }))
        }
    }
}

/// Error payload with a stable code.
pub fn error_body(err: &FxError) -> Value {
    json!({
        "error": err.error_code(),
        "message": err.to_string(),
    })
}
