//! Structured output for scripting callers
//!
//! Reports, plans, and outcomes serialize into a small versioned envelope
//! so the human rendering can evolve without breaking `--format json`
//! consumers.

use crate::error::Result;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T>
where
    T: Serialize,
{
    pub version: String,
    pub operation: String,
    pub ok: bool,
    pub data: T,
    pub warnings: Vec<String>,
    pub generated_at: String,
}

/// Render `data` under the v1 envelope in the requested format.
/// Unknown formats are ignored so the human path stays the default.
pub fn emit_v1<T>(operation: &str, ok: bool, data: T, warnings: Vec<String>, format: &str) -> Result<()>
where
    T: Serialize,
{
    let envelope = Envelope {
        version: "v1".to_string(),
        operation: operation.to_string(),
        ok,
        data,
        warnings,
        generated_at: Utc::now().to_rfc3339(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&envelope)?),
        "yaml" => println!("{}", serde_yml::to_string(&envelope)?),
        _ => {}
    }

    Ok(())
}
