use crate::{OutputMode, emit_success};
use owo_colors::OwoColorize;
use wordcounter::storage::schema;
use wordcounter::ui::{self, theme};

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        ui::header(&format!(
            "{} {}",
            "Wordcounter".bold(),
            env!("CARGO_PKG_VERSION").style(theme().info.clone())
        ));
        ui::info("Schema version", &schema::SCHEMA_VERSION.to_string());
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "schema_version": schema::SCHEMA_VERSION,
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}
