use anyhow::{Context, Result};

use crate::layout::LayoutConfig;

/// Service configuration loaded from environment variables.
/// The layout engine itself never reads the environment; it only receives
/// the `LayoutConfig` assembled here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let lookup = |key: &str| std::env::var(key).ok();

        let base = match lookup("LAYOUT_CONFIG_PATH") {
            Some(path) => load_layout_file(&path)?,
            None => LayoutConfig::default(),
        };
        let layout = apply_layout_overrides(base, lookup)?;
        layout
            .validate()
            .context("Layout configuration from environment is invalid")?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            layout,
        })
    }
}

/// Reads a JSON `LayoutConfig`; omitted fields keep their defaults.
fn load_layout_file(path: &str) -> Result<LayoutConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read LAYOUT_CONFIG_PATH '{path}'"))?;
    serde_json::from_str(&raw).with_context(|| format!("'{path}' is not a valid layout config"))
}

/// Single-value overrides for the two constants most often re-tuned per canvas.
fn apply_layout_overrides<F>(mut layout: LayoutConfig, lookup: F) -> Result<LayoutConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("LAYOUT_MIN_SEPARATION") {
        layout.search.min_separation = parse_px("LAYOUT_MIN_SEPARATION", &value)?;
    }
    if let Some(value) = lookup("LAYOUT_REPOSITION_TOLERANCE") {
        layout.relocation.reposition_tolerance = parse_px("LAYOUT_REPOSITION_TOLERANCE", &value)?;
    }
    Ok(layout)
}

fn parse_px(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{key} must be a number of pixels, got '{value}'"))
}
