//! Template helpers for block markup.
//!
//! The pure functions here are also registered as Tera functions by
//! [`super::block_render::BlockRenderer`].

use std::collections::HashMap;

use jetstream_sdk::content::LinkValue;
use serde_json::Value;

/// Fallback image size when no dimensions are known.
pub const DEFAULT_IMAGE_WIDTH: i64 = 600;
pub const DEFAULT_IMAGE_HEIGHT: i64 = 400;

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Target of a link value: page URL, else document URL, else the raw URL.
pub fn link_url(link: &Value) -> Option<String> {
    let link: LinkValue = serde_json::from_value(link.clone()).ok()?;
    link.href().map(str::to_string)
}

/// What remains of the 12-unit grid after the given column widths, or None
/// when the arithmetic overflows.
pub fn subtract_from_twelve(widths: &[i64]) -> Option<i64> {
    widths
        .iter()
        .try_fold(0i64, |total, w| total.checked_add(*w))
        .and_then(|used| 12i64.checked_sub(used))
}

/// Pixel width of `units` grid columns inside a parent `parent_px` wide.
///
/// The gutter after the last column is not part of the block, so it is
/// added to the parent before dividing and removed again afterwards.
pub fn width_from_arbitrary_parent(parent_px: i64, units: i64, gutter: i64) -> i64 {
    let unit = (parent_px + gutter) as f64 / 12.0;
    (unit * units as f64 - gutter as f64).ceil() as i64
}

/// Rendered image size.
///
/// Fixed dimensions win when enabled; otherwise the parent's suggested size
/// is used, falling back to 600x400 when the parent gives none.
pub fn image_dimensions(
    fixed: Option<&Value>,
    parent_width: Option<i64>,
    parent_height: Option<i64>,
) -> (i64, i64) {
    if let Some(fixed) = fixed.filter(|f| f.get("use").and_then(Value::as_bool) == Some(true)) {
        let width = fixed.get("width").and_then(Value::as_i64).unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = fixed.get("height").and_then(Value::as_i64).unwrap_or(DEFAULT_IMAGE_HEIGHT);
        return (width, height);
    }
    (
        parent_width.filter(|w| *w > 0).unwrap_or(DEFAULT_IMAGE_WIDTH),
        parent_height.filter(|h| *h > 0).unwrap_or(DEFAULT_IMAGE_HEIGHT),
    )
}

// ---------------------------------------------------------------------------
// Tera function adapters
// ---------------------------------------------------------------------------

fn int_arg(args: &HashMap<String, Value>, name: &str) -> Option<i64> {
    match args.get(name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn tera_link_url(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let link = args.get("link").unwrap_or(&Value::Null);
    Ok(link_url(link).map(Value::from).unwrap_or(Value::Null))
}

pub(crate) fn tera_subtract_from_twelve(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let widths = match args.get("widths") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| tera::Error::msg(format!("subtract_from_twelve: '{v}' is not an integer")))
            })
            .collect::<tera::Result<Vec<_>>>()?,
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "subtract_from_twelve: expected a list of widths, got '{other}'"
            )));
        }
        None => Vec::new(),
    };
    subtract_from_twelve(&widths)
        .map(Value::from)
        .ok_or_else(|| tera::Error::msg(format!("subtract_from_twelve: {widths:?} overflows")))
}

pub(crate) fn tera_width_from_arbitrary_parent(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let parent = int_arg(args, "parent").ok_or_else(|| {
        tera::Error::msg("width_from_arbitrary_parent: 'parent' must be an integer")
    })?;
    let units = int_arg(args, "units").ok_or_else(|| {
        tera::Error::msg("width_from_arbitrary_parent: 'units' must be an integer")
    })?;
    let gutter = int_arg(args, "gutter").unwrap_or(0);
    Ok(Value::from(width_from_arbitrary_parent(parent, units, gutter)))
}

pub(crate) fn tera_image_dimensions(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let (width, height) = image_dimensions(
        args.get("fixed"),
        int_arg(args, "parent_width"),
        int_arg(args, "parent_height"),
    );
    Ok(serde_json::json!({"width": width, "height": height}))
}
