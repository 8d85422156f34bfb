use objinspect_core::{Inspected, MappingView};
use objinspect_inspect::FormatOptions;
use objinspect_inspect::format::render_inspected;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render one inspection result in the requested format.
pub fn render(
    inspected: &Inspected,
    format: OutputFormat,
    options: &FormatOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Pretty => Ok(render_inspected(inspected, options)),
        OutputFormat::Json | OutputFormat::Raw => to_json(&inspected.to_mapping()?, format),
    }
}

/// Render several results as a JSON array. Pretty output of many results is
/// the namespace listing, which callers render themselves.
pub fn render_all(items: &[Inspected], format: OutputFormat) -> anyhow::Result<String> {
    let mappings = items
        .iter()
        .map(MappingView::to_mapping)
        .collect::<Result<Vec<_>, _>>()?;
    to_json(&Value::Array(mappings), format)
}

fn to_json(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Raw {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}
