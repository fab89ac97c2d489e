//! # Personalization Profile
//!
//! The AI-personalization settings the profile panel renders. The structure
//! is deliberately sparse: every sub-section is an `Option`, and a section
//! renders if and only if its key is present in the source file — the
//! *content* of a present section is never consulted for gating. An
//! all-false `[layout]` table still gets a layout block; a missing one
//! doesn't.
//!
//! Profiles are produced elsewhere (by the recommendation backend) and
//! consumed read-only here, so there is no validation and no error path
//! beyond "the file didn't parse": a sparse or odd profile simply produces
//! a narrower render.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Top-level personalization settings. All sections optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PersonalizationSettings {
    pub layout: Option<LayoutPrefs>,
    pub content: Option<ContentPrefs>,
    pub pricing: Option<PricingPrefs>,
    pub recommendations: Option<Vec<String>>,
}

/// Layout flags: how the booking UI should be arranged for this traveler.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LayoutPrefs {
    #[serde(default)]
    pub prioritize_search: bool,
    #[serde(default)]
    pub show_map_first: bool,
    #[serde(default)]
    pub compact_results: bool,
}

/// Content preferences. Each field independently optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ContentPrefs {
    pub recommended_routes: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub communication_tone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

/// Pricing display flags.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PricingPrefs {
    #[serde(default)]
    pub show_deals: bool,
    #[serde(default)]
    pub hide_premium: bool,
    #[serde(default)]
    pub currency_local: bool,
}

impl PersonalizationSettings {
    /// True when no section is present at all (renders as a placeholder).
    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
            && self.content.is_none()
            && self.pricing.is_none()
            && self.recommendations.is_none()
    }

    /// Whether the recommendations block should render: present AND non-empty.
    /// The only section where emptiness matters — an empty ordered list has
    /// nothing to order.
    pub fn has_recommendations(&self) -> bool {
        self.recommendations
            .as_ref()
            .is_some_and(|r| !r.is_empty())
    }
}

#[derive(Debug)]
pub enum ProfileError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io(e) => write!(f, "profile I/O error: {e}"),
            ProfileError::Toml(e) => write!(f, "profile parse error: {e}"),
            ProfileError::Json(e) => write!(f, "profile parse error: {e}"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Load a profile from disk, dispatching on extension (`.json` vs TOML).
///
/// A missing file is not an error — it means no settings were supplied, and
/// the panel renders its placeholder. A present-but-malformed file is.
pub fn load_profile(path: &Path) -> Result<Option<PersonalizationSettings>, ProfileError> {
    if !path.exists() {
        warn!("No profile at {}, panel will be empty", path.display());
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(ProfileError::Io)?;
    let settings = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        serde_json::from_str(&contents).map_err(ProfileError::Json)?
    } else {
        toml::from_str(&contents).map_err(ProfileError::Toml)?
    };
    info!("Loaded profile from {}", path.display());
    Ok(Some(settings))
}
