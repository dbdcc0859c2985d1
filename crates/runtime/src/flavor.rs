//! Fun facts about the item on screen.
//!
//! Any source may fail or return junk; the player then sees [`FALLBACK_TEXT`].
//! Session state is never touched.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::types::{Category, Item};

/// Shown when no fun fact could be produced.
pub const FALLBACK_TEXT: &str = "Could not fetch a fun fact right now.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlavorTextError {
    #[error("flavor text source unavailable: {0}")]
    Unavailable(String),
    #[error("flavor text source returned no text")]
    Empty,
}

#[async_trait]
pub trait FlavorTextSource: Send + Sync {
    async fn describe(&self, item: &Item) -> Result<String, FlavorTextError>;
}

/// Request text for a text-generation service.
pub fn prompt_for(item: &Item) -> String {
    format!(
        "Give a short, interesting recycling fact or tip about \"{}\" ({}). \
         Keep it to 2-3 sentences.",
        item.label,
        item.category.display_name()
    )
}

/// Ask `source` about `item`, falling back to [`FALLBACK_TEXT`] on any failure.
pub async fn describe_or_fallback(source: &dyn FlavorTextSource, item: &Item) -> String {
    match source.describe(item).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!(item = item.label, error = %FlavorTextError::Empty, "flavor text failed");
            FALLBACK_TEXT.to_string()
        }
        Err(error) => {
            warn!(item = item.label, %error, "flavor text failed");
            FALLBACK_TEXT.to_string()
        }
    }
}

/// Built-in tips, one per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFlavorText;

impl CannedFlavorText {
    fn tip(category: Category) -> &'static str {
        match category {
            Category::Paper => {
                "Paper fibres can be recycled five to seven times before they get too short to bind."
            }
            Category::Plastic => {
                "Rinsing plastic packaging before recycling keeps whole batches from being rejected."
            }
            Category::Glass => {
                "Glass can be melted and reshaped endlessly without losing quality."
            }
            Category::Organic => {
                "Composted food scraps return nutrients to the soil instead of making methane in landfills."
            }
            Category::Metal => {
                "Recycling aluminium uses about 95% less energy than making it from ore."
            }
        }
    }
}

#[async_trait]
impl FlavorTextSource for CannedFlavorText {
    async fn describe(&self, item: &Item) -> Result<String, FlavorTextError> {
        Ok(format!("{}: {}", item.label, Self::tip(item.category)))
    }
}
