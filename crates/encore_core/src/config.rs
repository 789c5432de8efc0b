//! Site configuration
//!
//! Every tunable constant of the page interactions lives here, with defaults
//! matching the shipped site. A config file only needs the keys it overrides:
//!
//! ```toml
//! [navigation]
//! tie_break = "topmost"
//!
//! [contact]
//! recipient = "booking@example.com"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navigation: NavigationConfig,
    pub music: MusicConfig,
    pub news: NewsConfig,
    pub contact: ContactConfig,
}

/// How the scroll-spy picks a section when several start intersecting in one batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The entry processed last wins
    #[default]
    LastEntry,
    /// The entry whose section starts highest on the page wins
    Topmost,
}

/// Header, navigation, scroll-spy and page-end settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Section id of the call-to-action link, which is never shown as active
    pub call_to_action: String,
    /// Extra space kept between the header and a scroll target (px)
    pub scroll_padding: f64,
    /// Fraction of the viewport height cut from the bottom of the spy band
    pub spy_bottom_margin: f64,
    /// Tie-break rule for simultaneous intersections
    pub tie_break: TieBreak,
    /// Distance from the document bottom that counts as the page end (px)
    pub page_end_tolerance: f64,
    /// Scroll offset past which the header is marked as scrolled (px)
    pub scrolled_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            call_to_action: "contact".to_string(),
            scroll_padding: 8.0,
            spy_bottom_margin: 0.8,
            tie_break: TieBreak::LastEntry,
            page_end_tolerance: 2.0,
            scrolled_threshold: 1.0,
        }
    }
}

/// Horizontal music list settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Fraction of the visible width moved by one prev/next activation
    pub scroll_step: f64,
    /// Distance from either end at which a control is disabled (px)
    pub edge_tolerance: f64,
    /// Content must exceed the visible width by more than this to overflow (px)
    pub overflow_tolerance: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            scroll_step: 0.8,
            edge_tolerance: 2.0,
            overflow_tolerance: 2.0,
        }
    }
}

/// News list settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Items revealed per page
    pub page_size: usize,
    /// IANA timezone the dates are displayed in
    pub timezone: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            page_size: 3,
            timezone: "Europe/Amsterdam".to_string(),
        }
    }
}

impl NewsConfig {
    /// Resolve the display timezone
    pub fn display_timezone(&self) -> Result<Tz> {
        Tz::from_str(&self.timezone).map_err(|err| ConfigError::Invalid {
            field: "news.timezone",
            reason: err.to_string(),
        })
    }
}

/// Contact form settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Address the mail client is pointed at
    pub recipient: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "zippora__@live.nl".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Render the config as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        fn ratio(field: &'static str, value: f64) -> Result<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not in (0, 1]"),
                })
            }
        }

        fn non_negative(field: &'static str, value: f64) -> Result<()> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} must be a finite, non-negative length"),
                })
            }
        }

        ratio("navigation.spy_bottom_margin", self.navigation.spy_bottom_margin)?;
        ratio("music.scroll_step", self.music.scroll_step)?;
        non_negative("navigation.scroll_padding", self.navigation.scroll_padding)?;
        non_negative("navigation.page_end_tolerance", self.navigation.page_end_tolerance)?;
        non_negative("navigation.scrolled_threshold", self.navigation.scrolled_threshold)?;
        non_negative("music.edge_tolerance", self.music.edge_tolerance)?;
        non_negative("music.overflow_tolerance", self.music.overflow_tolerance)?;

        if self.navigation.call_to_action.is_empty() {
            return Err(ConfigError::Invalid {
                field: "navigation.call_to_action",
                reason: "must name a section id".to_string(),
            });
        }
        if self.news.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "news.page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.contact.recipient.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "contact.recipient",
                reason: "must not be empty".to_string(),
            });
        }
        self.news.display_timezone()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.news.page_size, 3);
        assert_eq!(config.navigation.call_to_action, "contact");
        assert_eq!(config.navigation.tie_break, TieBreak::LastEntry);
        assert_eq!(config.news.display_timezone().unwrap(), chrono_tz::Europe::Amsterdam);
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_toml_str(
            r#"
            [navigation]
            tie_break = "topmost"

            [news]
            page_size = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.tie_break, TieBreak::Topmost);
        assert_eq!(config.news.page_size, 5);
        // Untouched keys keep their defaults
        assert_eq!(config.navigation.scroll_padding, 8.0);
        assert_eq!(config.contact.recipient, "zippora__@live.nl");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = SiteConfig::from_toml_str("[news]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "news.page_size", .. }));
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let err = SiteConfig::from_toml_str("[news]\ntimezone = \"Mars/Olympus\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "news.timezone", .. }));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let err = SiteConfig::from_toml_str("[music]\nscroll_step = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "music.scroll_step", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = SiteConfig::from_toml_str("[news\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SiteConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(SiteConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
