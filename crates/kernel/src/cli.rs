//! CLI command implementations.
//!
//! Commands build on a schema registry and feature table that the binary
//! loads once; none of them write anything back.

use std::path::Path;

use anyhow::{Context, Result, bail};
use jetstream_sdk::content::parse_stream;
use jetstream_sdk::types::ChildSummary;

use crate::content::{BlockRenderer, clean_iframe, validate_stream};
use crate::features::{FeatureContext, FeatureTable};
use crate::registry::SchemaRegistry;

/// Resolution context for an optional site.
pub fn site_context<'t>(table: &'t FeatureTable, site: Option<&str>) -> Option<FeatureContext<'t>> {
    site.map(|s| table.context_for(s))
}

/// Print the block picker list for the page body or a layout column.
pub fn cmd_export(
    registry: &SchemaRegistry,
    table: &FeatureTable,
    site: Option<&str>,
    column: bool,
    json: bool,
) -> Result<()> {
    let ctx = site_context(table, site);
    let export = if column {
        registry.column_export(ctx.as_ref())?
    } else {
        registry.export(ctx.as_ref())?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }
    print_summaries(&export);
    Ok(())
}

fn print_summaries(export: &[ChildSummary]) {
    if export.is_empty() {
        println!("No blocks enabled.");
        return;
    }
    println!("{:<28} {:<32} {:<16}", "MACHINE NAME", "LABEL", "GROUP");
    println!("{}", "-".repeat(76));
    for child in export {
        println!("{:<28} {:<32} {:<16}", child.machine_name, child.label, child.group);
    }
}

/// Validate a stream file against the page body and print the cleaned form.
pub fn cmd_validate(
    registry: &SchemaRegistry,
    table: &FeatureTable,
    site: Option<&str>,
    path: &Path,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))?;
    let blocks = parse_stream(&content)
        .with_context(|| format!("failed to parse content stream at {}", path.display()))?;
    let ctx = site_context(table, site);

    match validate_stream(registry.body(), &blocks, ctx.as_ref()) {
        Ok(cleaned) => {
            println!("{}", serde_json::to_string_pretty(&cleaned)?);
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("  {error}");
            }
            bail!("{} validation error(s) in {}", errors.len(), path.display());
        }
    }
}

/// Render a stream file as HTML.
pub fn cmd_render(
    registry: &SchemaRegistry,
    renderer: &BlockRenderer,
    table: &FeatureTable,
    site: Option<&str>,
    path: &Path,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))?;
    let blocks = parse_stream(&content)
        .with_context(|| format!("failed to parse content stream at {}", path.display()))?;
    let ctx = site_context(table, site);

    let html = renderer.render_stream(registry.body(), &blocks, ctx.as_ref())?;
    print!("{html}");
    Ok(())
}

/// Print the cleaned form of pasted iframe markup.
pub fn cmd_clean_embed(markup: &str) -> Result<()> {
    let cleaned = clean_iframe(markup)?;
    println!("{cleaned}");
    Ok(())
}

/// List default and special features, and each configured site's features.
pub fn cmd_features(registry: &SchemaRegistry, table: &FeatureTable) -> Result<()> {
    let catalog = registry.features();
    println!("{:<28} {:<10}", "FEATURE", "TYPE");
    println!("{}", "-".repeat(38));
    for feature in &catalog.default {
        println!("{:<28} {:<10}", feature, "default");
    }
    for feature in &catalog.special {
        println!("{:<28} {:<10}", feature, "special");
    }

    let sites: Vec<&str> = table.sites().collect();
    if sites.is_empty() {
        println!("\nNo site feature table configured; all features enabled.");
        return Ok(());
    }
    for site in sites {
        let Some(enabled) = table.site(site) else {
            continue;
        };
        let features: Vec<&str> = enabled.iter().collect();
        println!("\n[{site}] {} enabled: {}", features.len(), features.join(", "));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::SchemaSettings;

    #[test]
    fn site_context_binds_only_known_sites() {
        let table = FeatureTable::parse_str("[sites.main]\nfeatures = [\"SpacerBlock\"]").unwrap();
        assert!(site_context(&table, None).is_none());
        assert!(site_context(&table, Some("main")).unwrap().has_registry());
        assert!(!site_context(&table, Some("other")).unwrap().has_registry());
    }

    #[test]
    fn clean_embed_rejects_plain_markup() {
        assert!(cmd_clean_embed("<p>hi</p>").is_err());
        assert!(cmd_clean_embed("<iframe src=\"https://x\"></iframe>").is_ok());
    }

    #[test]
    fn validate_reports_missing_file() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        let err = cmd_validate(
            &registry,
            &FeatureTable::default(),
            None,
            Path::new("/nonexistent/page.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read content file"));
    }
}
