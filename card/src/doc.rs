//! Card document model: the fields a user authors and the payload the
//! external renderer consumes.
//!
//! `CardFields` is what the persistence service stores and what the draft list
//! keeps locally. Field names on the wire are camelCase so records written by
//! either side stay interchangeable. The front-page collage layout is an
//! opaque JSON blob owned by the collage editor; this crate only carries it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

/// Built-in artwork for the inside of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockImage {
    Birthday,
    Valentine,
    Halloween,
    Christmas,
}

impl StockImage {
    pub const ALL: [StockImage; 4] = [Self::Birthday, Self::Valentine, Self::Halloween, Self::Christmas];

    /// The key stored in `CardFields::card_image`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Valentine => "valentine",
            Self::Halloween => "halloween",
            Self::Christmas => "christmas",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|img| img.key() == key)
    }
}

/// A card image reference, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    Stock(StockImage),
    /// URL of an uploaded image or exported collage.
    Custom(String),
}

impl CardImage {
    /// Classify a stored `card_image` value. Anything that is not a stock key is custom.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        StockImage::from_key(raw).map_or_else(|| Self::Custom(raw.to_owned()), Self::Stock)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stock(img) => img.key(),
            Self::Custom(url) => url,
        }
    }
}

/// Everything the author controls on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFields {
    /// Name shown in the local draft list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    /// Landing-page heading.
    pub header: String,
    /// Landing-page message.
    pub message: String,
    /// Stock image key or custom image URL.
    pub card_image: String,
    pub card_top: String,
    pub card_middle: String,
    pub card_bottom: String,
    /// Serialized collage layout for the front page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_page_layout: Option<serde_json::Value>,
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            card_name: None,
            header: "Happy Birthday!".into(),
            message: "Experience your AR card below.".into(),
            card_image: StockImage::Birthday.key().into(),
            card_top: "Dear John,".into(),
            card_middle: "Have a great birthday!".into(),
            card_bottom: "Love Jane".into(),
            front_page_layout: None,
        }
    }
}

impl CardFields {
    #[must_use]
    pub fn image(&self) -> CardImage {
        CardImage::parse(&self.card_image)
    }

    /// The subset forwarded to the external renderer.
    #[must_use]
    pub fn renderer_data(&self) -> RendererCardData {
        RendererCardData::from(self)
    }
}

/// Payload delivered to the embedded renderer's card object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererCardData {
    pub card_image: String,
    pub card_top: String,
    pub card_middle: String,
    pub card_bottom: String,
}

impl From<&CardFields> for RendererCardData {
    /// An empty image falls back to the birthday artwork.
    fn from(fields: &CardFields) -> Self {
        let card_image = if fields.card_image.trim().is_empty() {
            StockImage::Birthday.key().to_owned()
        } else {
            fields.card_image.clone()
        };
        Self {
            card_image,
            card_top: fields.card_top.clone(),
            card_middle: fields.card_middle.clone(),
            card_bottom: fields.card_bottom.clone(),
        }
    }
}
