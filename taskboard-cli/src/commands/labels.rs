//! labels

use crate::cli::OutputFormat;
use comfy_table::{presets::UTF8_FULL, Table};
use taskboard::{LabelCatalog, TaskboardConfig};

pub fn list(config: &TaskboardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = config.label_catalog();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Table if catalog.is_empty() => println!("No labels configured"),
        OutputFormat::Table => println!("{}", labels_table(&catalog)),
    }
    Ok(())
}

fn labels_table(catalog: &LabelCatalog) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Color"]);

    for label in catalog.labels() {
        table.add_row(vec![label.id.as_str(), label.name.as_str(), label.color.as_str()]);
    }
    table
}
