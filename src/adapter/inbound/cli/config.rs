//! Handlers for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::command::DEFAULT_CONFIG;
use super::output;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Documented configuration template.
pub const CONFIG_TEMPLATE: &str = include_str!("../../../../tradelane.toml.example");

/// Load `path`. The default path may be absent, in which case built-in
/// defaults apply; an explicitly named file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load(path: &Path) -> Result<Config> {
    if path == Path::new(DEFAULT_CONFIG) {
        Config::load_or_default(path)
    } else {
        Config::load(path)
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your snapshot paths", path.display()));
    output::note(&format!("2. Run: tradelane check config -c {}", path.display()));
    output::note(&format!("3. Run: tradelane scan -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = load(path)?;
    let scan = config.scan_config();

    if output::is_json() {
        output::record(
            "config",
            json!({
                "path": path.display().to_string(),
                "scan": {
                    "min_margin": scan.matching.min_margin.to_string(),
                    "max_item_purchase_price": scan.matching.max_buy_price.to_string(),
                    "min_potential_revenue": scan.matching.min_revenue.to_string(),
                    "min_system_security": scan.matching.min_security.to_string(),
                    "safe_regions": scan.safe_regions,
                    "parallel": scan.parallel,
                },
                "cargo": {
                    "enabled": scan.cargo.enabled,
                    "capacity": scan.cargo.capacity.to_string(),
                },
                "routes": {
                    "enabled": scan.routes.enabled,
                    "failure": scan.routes.failure.to_string(),
                    "table": scan.routes.table.as_ref().map(|p| p.display().to_string()),
                },
                "input": {
                    "orders": config.input.orders.display().to_string(),
                    "locations": config.input.locations.display().to_string(),
                    "items": config.input.items.as_ref().map(|p| p.display().to_string()),
                },
                "output": {
                    "report": config.output.report.display().to_string(),
                    "top": config.output.top,
                },
                "logging": {
                    "level": config.logging.level,
                    "format": config.logging.format,
                },
            }),
        );
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        if path.exists() {
            path.display().to_string()
        } else {
            "(defaults)".to_string()
        },
    );

    output::section("Scan");
    output::field("Min margin", format!("{}%", scan.matching.min_margin));
    output::field("Max buy price", scan.matching.max_buy_price);
    output::field("Min revenue", scan.matching.min_revenue);
    output::field("Min security", scan.matching.min_security);
    output::field("Safe regions", yes_no(scan.safe_regions));
    output::field("Parallel", yes_no(scan.parallel));

    output::section("Single Cargo");
    output::field("Enabled", yes_no(scan.cargo.enabled));
    if scan.cargo.enabled {
        output::field("Capacity", format!("{} m3", scan.cargo.capacity));
    }

    output::section("Routes");
    output::field("Enabled", yes_no(scan.routes.enabled));
    if scan.routes.enabled {
        output::field("On failure", scan.routes.failure.to_string());
        if let Some(table) = &scan.routes.table {
            output::field("Table", table.display());
        }
    }

    output::section("Files");
    output::field("Orders", config.input.orders.display());
    output::field("Locations", config.input.locations.display());
    output::field(
        "Items",
        config
            .input
            .items
            .as_ref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
    );
    output::field("Report", config.output.report.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.output.top, 10);
        assert!(!config.cargo.enabled);
    }

    #[test]
    fn init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tradelane.toml");

        execute_init(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradelane.toml");
        fs::write(&path, "# mine").unwrap();

        let result = execute_init(&path, false);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "config", .. }))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
