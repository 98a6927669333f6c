//! Standard block catalog.
//!
//! Component sub-blocks (links, dimension and color options, action buttons)
//! only appear nested inside other blocks. Content blocks are the
//! feature-registered blocks editors pick from a stream.

use std::sync::Arc;

use jetstream_sdk::types::{FeatureType, StyleVariant};

use crate::schema::{BlockType, FieldDefinition, FieldType, ReferenceKind};

/// Background color choices. The empty value means transparent.
pub const BACKGROUND_COLORS: &[(&str, &str)] = &[
    ("", "Transparent"),
    ("white", "White"),
    ("black", "Black"),
    ("orange", "Orange"),
    ("ltgray", "Light Gray"),
    ("midgray", "Mid Gray"),
    ("darkergray", "Dark Gray"),
    ("dkgray", "Very Dark Gray"),
    ("olivegreen", "Olive Green"),
    ("purple", "Purple"),
    ("darkteal", "Dark Teal"),
];

/// Text color choices. The empty value means the theme default.
pub const FOREGROUND_COLORS: &[(&str, &str)] = &[
    ("", "Default"),
    ("dkgray", "Dark Gray"),
    ("black", "Black"),
    ("white", "White"),
];

/// Gallery column counts; factors of the 12-column grid only.
pub const GALLERY_COLUMNS: &[i64] = &[1, 2, 3, 4, 6];

const SPACER_HEIGHTS: &[i64] = &[12, 20, 25, 30, 40, 50, 75, 100, 125, 150, 175, 200, 225, 250];

const FIXED_HEIGHT_HELP: &str = "If \"Fixed Dimensions\" is checked, or if this block is placed outside a \
    layout element (e.g. outside a N-Column layout), set the image to be this many pixels tall.";
const FIXED_WIDTH_HELP: &str = "If \"Fixed Dimensions\" is checked, or if this block is placed outside a \
    layout element (e.g. outside a N-Column layout), set the image to be this many pixels wide.";
const CYCLE_HELP: &str = "The time between automatic image cycles (in milliseconds). Set to 0 to \
    disable automatic cycling.";

fn text() -> FieldType {
    FieldType::Text { max_length: None }
}

fn nested(block: BlockType) -> FieldType {
    FieldType::Struct(Arc::new(block))
}

// =============
// Sub-blocks
// =============

/// A page, a document or a URL. Page wins over document, document over URL.
pub fn link_block() -> BlockType {
    BlockType::new("LinkBlock")
        .label("Link")
        .field(
            FieldDefinition::new("page", FieldType::Reference(ReferenceKind::Page))
                .optional()
                .help("Link to the chosen page. If a Page is selected, it will take precedence over both."),
        )
        .field(
            FieldDefinition::new("document", FieldType::Reference(ReferenceKind::Document))
                .optional()
                .help("Link to the chosen document. If a document is selected, it will take precedence over a URL."),
        )
        .field(
            FieldDefinition::new("url", FieldType::Reference(ReferenceKind::Url))
                .optional()
                .help("Link to the given URL. This can be a relative URL to a location on your own site or an absolute URL."),
        )
}

pub fn dimensions_options_block() -> BlockType {
    BlockType::new("DimensionsOptionsBlock")
        .label("Dimensions")
        .field(
            FieldDefinition::new("use", FieldType::Boolean)
                .label("Use Fixed Dimensions")
                .default(false),
        )
        .field(
            FieldDefinition::new("height", FieldType::Integer)
                .label("Height (pixels)")
                .help(FIXED_HEIGHT_HELP)
                .default(200),
        )
        .field(
            FieldDefinition::new("width", FieldType::Integer)
                .label("Width (pixels)")
                .help(FIXED_WIDTH_HELP)
                .default(200),
        )
}

pub fn background_options_block() -> BlockType {
    BlockType::new("BackgroundOptionsBlock")
        .label("Background")
        .field(background_image_field())
        .field(background_color_field())
}

pub fn color_options_block() -> BlockType {
    BlockType::new("ColorOptionsBlock")
        .label("Colors")
        .field(background_image_field())
        .field(background_color_field())
        .field(
            FieldDefinition::new("text_color", FieldType::choice(FOREGROUND_COLORS))
                .optional()
                .help("Set the color for the text in this block.")
                .default(""),
        )
}

fn background_image_field() -> FieldDefinition {
    FieldDefinition::new("background_image", FieldType::Image)
        .optional()
        .help("This image, if supplied, will appear as a background for this block")
}

fn background_color_field() -> FieldDefinition {
    FieldDefinition::new("background_color", FieldType::choice(BACKGROUND_COLORS))
        .optional()
        .help("Set the background color of this block. A Background Image is displayed instead of this color.")
        .default("")
}

pub fn action_button_block() -> BlockType {
    BlockType::new("ActionButtonBlock")
        .label("Action Button")
        .icon("form")
        .template("jetstream/blocks/action_button_block.html")
        .field(FieldDefinition::new("text", FieldType::TextArea))
        .field(FieldDefinition::new("link", nested(link_block())))
        .field(
            FieldDefinition::new(
                "style",
                FieldType::choice(&[
                    ("btn-primary", "Primary"),
                    ("btn-light", "Default"),
                    ("btn-link", "Info"),
                ]),
            )
            .default("btn-primary"),
        )
}

pub fn action_button_bar_block() -> BlockType {
    BlockType::new("ActionButtonBarBlock")
        .label("Action Button Bar")
        .icon("form")
        .template("jetstream/blocks/action_button_bar_block.html")
        .field(
            FieldDefinition::new(
                "alignment",
                FieldType::choice(&[
                    ("center-block", "Center"),
                    ("left-align-block", "Align Left"),
                    ("right-align-block", "Align Right"),
                ]),
            )
            .default("center-block"),
        )
        .field(
            FieldDefinition::new("actions", FieldType::List(Box::new(nested(action_button_block()))))
                .default(serde_json::json!([])),
        )
}

pub fn related_links_node_block() -> BlockType {
    BlockType::new("RelatedLinksNodeBlock")
        .label("Link")
        .template("jetstream/blocks/related_link.html")
        .field(FieldDefinition::new("text", text()))
        .field(FieldDefinition::new("link", nested(link_block())))
}

// ==============
// Content blocks
// ==============

pub fn image_panel_block() -> BlockType {
    BlockType::new("ImagePanelBlock")
        .label("Image Panel")
        .icon("image")
        .group("Multimedia")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("image", FieldType::Image))
        .styles(
            vec![
                StyleVariant::new("link", "Image Link", "jetstream/blocks/image_panel_block-link.html"),
                StyleVariant::new(
                    "captioned",
                    "Image w/ Caption",
                    "jetstream/blocks/image_panel_block-caption.html",
                ),
                StyleVariant::new(
                    "rollover",
                    "Image Link w/ Rollover Text",
                    "jetstream/blocks/image_panel_block-rollover.html",
                ),
                StyleVariant::new(
                    "separate_text",
                    "Image Card (Equal Heights)",
                    "jetstream/blocks/image_panel_block-card.html",
                )
                .classes(&["equal"]),
                StyleVariant::new(
                    "separate_text_natural",
                    "Image Card (Natural Heights)",
                    "jetstream/blocks/image_panel_block-card.html",
                )
                .classes(&["natural"]),
                StyleVariant::new(
                    "image_listing_left",
                    "Listing (Image Left)",
                    "jetstream/blocks/image_panel_block-listing.html",
                )
                .classes(&["left"]),
                StyleVariant::new(
                    "image_listing_right",
                    "Listing (Image Right)",
                    "jetstream/blocks/image_panel_block-listing.html",
                )
                .classes(&["right"]),
            ],
            "link",
        )
        .field(FieldDefinition::new("title", text()).optional())
        .field(FieldDefinition::new("desc", text()).optional().label("Body"))
        .field(
            FieldDefinition::new("display_caption", FieldType::Boolean)
                .label("Display Caption")
                .help("Check this box to display the caption and photo credit below this image.")
                .default(false),
        )
        .field(FieldDefinition::new("link", nested(link_block())))
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

pub fn hero_image_block() -> BlockType {
    BlockType::new("HeroImageBlock")
        .label("Hero Image")
        .icon("image")
        .group("Multimedia")
        .template("jetstream/blocks/hero_image_block.html")
        .feature(FeatureType::Default)
        .field(
            FieldDefinition::new(
                "style",
                FieldType::choice(&[("regular-width", "Regular Width"), ("full-width", "Full Width")]),
            )
            .label("Overall style")
            .help("Regular Width fills the normal page area. Full Width fills the entire width of the browser.")
            .default("regular-width"),
        )
        .field(
            FieldDefinition::new(
                "text_style",
                FieldType::choice(&[
                    ("bare-serif", "Bare text w/ serif font"),
                    ("bare-sans-serif", "Bare text w/ sans-serif font"),
                    ("white-translucent-serif", "White translucent background behind serif text"),
                    ("white-translucent-sans-serif", "White translucent background behind sans-serif text"),
                ]),
            )
            .label("Text style")
            .default("white-translucent-serif"),
        )
        .field(FieldDefinition::new("image", FieldType::Image))
        .field(FieldDefinition::new("title", text()).optional())
        .field(FieldDefinition::new("desc", FieldType::RichText).optional().label("Text"))
        .field(
            FieldDefinition::new("height", FieldType::Integer)
                .label("Height (pixels)")
                .default(500),
        )
        .field(
            FieldDefinition::new(
                "position",
                FieldType::choice(&[
                    ("position-top-left", "Top Left"),
                    ("position-top-middle", "Top Middle"),
                    ("position-top-right", "Top Right"),
                    ("position-left", "Left"),
                    ("position-middle", "Middle"),
                    ("position-right", "Right"),
                    ("position-bottom-left", "Bottom Left"),
                    ("position-bottom-middle", "Bottom Middle"),
                    ("position-bottom-right", "Bottom Right"),
                ]),
            )
            .label("Text Position")
            .default("position-middle"),
        )
        .field(FieldDefinition::new("actions", nested(action_button_bar_block())).label("Action Buttons"))
}

pub fn hero_image_carousel_block() -> BlockType {
    let slide = BlockType::new("HeroImageSlide")
        .label("Slide")
        .field(FieldDefinition::new("image", FieldType::Image))
        .field(FieldDefinition::new("title", text()).optional())
        .field(FieldDefinition::new("text", FieldType::TextArea).optional())
        .field(FieldDefinition::new("link", nested(link_block())));
    BlockType::new("HeroImageCarouselBlock")
        .label("Hero Image Slider")
        .icon("image")
        .group("Multimedia")
        .template("jetstream/blocks/hero_image_carousel_block.html")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("slides", FieldType::List(Box::new(nested(slide)))))
        .field(
            FieldDefinition::new("height", FieldType::Integer)
                .label("Hero Image Height (pixels)")
                .default(300),
        )
        .field(
            FieldDefinition::new("width", FieldType::Integer)
                .label("Hero Image Width (pixels)")
                .default(1000),
        )
        .field(
            FieldDefinition::new("cycle_timeout", FieldType::Integer)
                .help(CYCLE_HELP)
                .default(10000),
        )
}

pub fn image_carousel_block() -> BlockType {
    let slide = BlockType::new("ImageCarouselSlide")
        .label("Slide")
        .field(FieldDefinition::new("image", FieldType::Image))
        .field(FieldDefinition::new("text", text()).optional())
        .field(FieldDefinition::new("link", nested(link_block())));
    BlockType::new("ImageCarouselBlock")
        .label("Image Carousel")
        .icon("image")
        .group("Multimedia")
        .template("jetstream/blocks/image_carousel_block.html")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("header", FieldType::TextArea).optional())
        .field(FieldDefinition::new("slides", FieldType::List(Box::new(nested(slide)))))
        .field(
            FieldDefinition::new("cycle_timeout", FieldType::Integer)
                .help(CYCLE_HELP)
                .default(5000),
        )
}

pub fn image_gallery_block() -> BlockType {
    BlockType::new("ImageGalleryBlock")
        .label("Image Gallery")
        .icon("image")
        .group("Multimedia")
        .feature(FeatureType::Default)
        .styles(
            vec![
                StyleVariant::new("gallery", "Image Gallery", "jetstream/blocks/image_gallery_block-gallery.html"),
                StyleVariant::new(
                    "slider",
                    "Image Slider w/ Thumbnail Picker",
                    "jetstream/blocks/image_gallery_block-slider.html",
                ),
            ],
            "gallery",
        )
        .field(
            FieldDefinition::new("columns", FieldType::integer_choice(GALLERY_COLUMNS.iter().copied()))
                .default(3),
        )
        .field(
            FieldDefinition::new("height", FieldType::Integer)
                .label("Height (pixels)")
                .help("Images' widths will be scaled with the number of columns. This field determines their height.")
                .default(300),
        )
        .field(FieldDefinition::new(
            "images",
            FieldType::List(Box::new(FieldType::Image)),
        ))
}

pub fn spacer_block() -> BlockType {
    BlockType::new("SpacerBlock")
        .label("Spacer")
        .icon("arrows-up-down")
        .group("Basic")
        .template("jetstream/blocks/spacer_block.html")
        .feature(FeatureType::Default)
        .field(
            FieldDefinition::new("height", FieldType::integer_choice(SPACER_HEIGHTS.iter().copied()))
                .label("Height (pixels)")
                .help("Add empty vertical space whose height is this many pixels.")
                .default(25),
        )
}

pub fn related_links_block() -> BlockType {
    BlockType::new("RelatedLinksBlock")
        .label("Related Links")
        .icon("list-ul")
        .group("Navigation")
        .template("jetstream/blocks/related_links_block.html")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("title", text()).optional().label("Title"))
        .field(
            FieldDefinition::new("links", FieldType::List(Box::new(nested(related_links_node_block()))))
                .label("Links"),
        )
        .field(FieldDefinition::new("color", nested(color_options_block())))
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

pub fn video_block() -> BlockType {
    BlockType::new("VideoBlock")
        .label("Video w/ Title")
        .icon("media")
        .group("Multimedia")
        .template("jetstream/blocks/video_block.html")
        .feature(FeatureType::Default)
        .field(
            FieldDefinition::new("video", FieldType::Embed)
                .label("Video Embed URL")
                .help("Paste the video URL from YouTube or Vimeo."),
        )
        .field(FieldDefinition::new("title", text()).optional())
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

pub fn section_title_block() -> BlockType {
    BlockType::new("SectionTitleBlock")
        .label("Section Title")
        .icon("form")
        .group("Basic")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("text", text()))
        .styles(
            vec![
                StyleVariant::new(
                    "section_divider",
                    "Section Divider",
                    "jetstream/blocks/section_title-section_divider.html",
                ),
                StyleVariant::new(
                    "block_header",
                    "Block Header",
                    "jetstream/blocks/section_title-block_header.html",
                ),
            ],
            "section_divider",
        )
}

pub fn menu_listing_block() -> BlockType {
    BlockType::new("MenuListingBlock")
        .label("Menu Section")
        .icon("list-ul")
        .group("Navigation")
        .template("jetstream/blocks/menu_listing_block.html")
        .feature(FeatureType::Default)
        .field(
            FieldDefinition::new("title", text())
                .optional()
                .help("If supplied, display this at the top of the menu listing"),
        )
        .field(
            FieldDefinition::new(
                "show",
                FieldType::choice(&[("siblings", "Page Siblings"), ("children", "Page Children")]),
            )
            .default("siblings"),
        )
        .field(FieldDefinition::new("color", nested(color_options_block())))
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

pub fn fancy_rich_text_block() -> BlockType {
    BlockType::new("FancyRichTextBlock")
        .label("Rich Text")
        .icon("doc-full")
        .group("Basic")
        .template("jetstream/blocks/fancy_rich_text_block.html")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("text", FieldType::RichText).label("Body"))
        .field(FieldDefinition::new("color", nested(color_options_block())))
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

/// Solid-color grid block with a title and a blurb. Only offered inside
/// column layouts.
pub fn callout_block() -> BlockType {
    BlockType::new("CalloutBlock")
        .label("Callout")
        .icon("doc-full")
        .group("Misc")
        .template("jetstream/blocks/callout_block.html")
        .feature(FeatureType::Default)
        .field(FieldDefinition::new("title", FieldType::Text { max_length: Some(100) }))
        .field(FieldDefinition::new("body", FieldType::RichText))
        .field(FieldDefinition::new("color", nested(color_options_block())))
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

/// Raw iframe embed. A special feature, so only sites that opt in get it.
pub fn iframe_embed_block() -> BlockType {
    BlockType::new("IFrameEmbedBlock")
        .label("iFrame")
        .icon("media")
        .group("Special")
        .template("jetstream/blocks/iframe_block.html")
        .feature(FeatureType::Special)
        .field(
            FieldDefinition::new("html", FieldType::EmbedMarkup)
                .help("Paste the iFrame from your provider here."),
        )
        .field(FieldDefinition::new("fixed_dimensions", nested(dimensions_options_block())))
}

/// The standard content blocks, built once and shared.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    column: Vec<Arc<BlockType>>,
    hero: Vec<Arc<BlockType>>,
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl BlockCatalog {
    pub fn standard() -> Self {
        let column = vec![
            fancy_rich_text_block(),
            callout_block(),
            image_carousel_block(),
            image_gallery_block(),
            related_links_block(),
            image_panel_block(),
            video_block(),
            iframe_embed_block(),
            section_title_block(),
            menu_listing_block(),
            spacer_block(),
        ];
        let hero = vec![hero_image_block(), hero_image_carousel_block()];
        Self {
            column: column.into_iter().map(Arc::new).collect(),
            hero: hero.into_iter().map(Arc::new).collect(),
        }
    }

    /// Blocks permitted inside layout columns, in declaration order.
    pub fn column_blocks(&self) -> Vec<Arc<BlockType>> {
        self.column.clone()
    }

    /// Full-width blocks permitted only at the top level of a page body.
    pub fn page_only_blocks(&self) -> Vec<Arc<BlockType>> {
        self.hero.clone()
    }

    /// Every content block in the catalog.
    pub fn all(&self) -> impl Iterator<Item = &Arc<BlockType>> {
        self.column.iter().chain(self.hero.iter())
    }

    pub fn get(&self, machine_name: &str) -> Option<Arc<BlockType>> {
        self.all()
            .find(|b| b.name().is_ok_and(|n| n == machine_name))
            .cloned()
    }
}
