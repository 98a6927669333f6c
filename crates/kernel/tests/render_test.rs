#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Block rendering tests.

mod common;

use jetstream_kernel::content::BlockRenderer;
use jetstream_kernel::features::{EnabledFeatures, FeatureContext};
use jetstream_test_utils::{assert, test_populated};
use serde_json::json;
use tera::Tera;

use common::registry;

fn renderer() -> BlockRenderer {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            "jetstream/blocks/layout/two_column_block.html",
            "<div class=\"row\"><div class=\"col-md-{{ value.left_column_width }}\">{{ children.left_column | safe }}</div>\
             <div class=\"col-md-{{ 12 - value.left_column_width }}\">{{ children.right_column | safe }}</div></div>",
        ),
        (
            "jetstream/blocks/spacer_block.html",
            "<div class=\"spacer\" style=\"height: {{ value.height }}px\"></div>",
        ),
        (
            "jetstream/blocks/image_panel_block-card.html",
            "<div class=\"image-panel {{ extra_classes }}\">{{ value.title }}</div>",
        ),
    ])
    .unwrap();
    BlockRenderer::from_tera(tera)
}

#[test]
fn test_layout_renders_columns_through_templates() {
    let stream = vec![
        test_populated("two_column_layout")
            .with_field("left_column_width", json!(8))
            .with_stream(
                "left_column",
                vec![test_populated("SpacerBlock").with_field("height", json!(40)).build()],
            )
            .build(),
    ];
    let html = renderer().render_stream(registry().body(), &stream, None).unwrap();
    assert::contains(&html, "<div class=\"col-md-8\">");
    assert::contains(&html, "<div class=\"col-md-4\">");
    assert::contains(&html, "style=\"height: 40px\"");
    assert::contains(&html, "<div class=\"block-two_column_layout\">");
}

#[test]
fn test_style_classes_reach_template() {
    let stream = vec![
        test_populated("ImagePanelBlock")
            .with_field("style", json!("separate_text"))
            .with_field("title", json!("Card"))
            .build(),
    ];
    let html = renderer().render_stream(registry().body(), &stream, None).unwrap();
    assert::contains(&html, "<div class=\"image-panel equal\">Card</div>");
}

#[test]
fn test_unknown_style_renders_structure() {
    let stream = vec![
        test_populated("ImagePanelBlock")
            .with_field("style", json!("retired_style"))
            .with_field("title", json!("<Old>"))
            .build(),
    ];
    let html = renderer().render_stream(registry().body(), &stream, None).unwrap();
    assert::contains(&html, "<dt>title</dt>\n<dd>&lt;Old&gt;</dd>");
}

#[test]
fn test_disabled_blocks_are_skipped() {
    let stream = vec![
        test_populated("SpacerBlock").with_field("height", json!(20)).build(),
        test_populated("VideoBlock").build(),
    ];
    let enabled = EnabledFeatures::new(["SpacerBlock"]);
    let ctx = FeatureContext::new("main", &enabled);
    let html = renderer().render_stream(registry().body(), &stream, Some(&ctx)).unwrap();
    assert::contains(&html, "height: 20px");
    assert::not_contains(&html, "block-VideoBlock");
}
