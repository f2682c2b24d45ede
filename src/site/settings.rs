//! Site-wide singleton records.

use serde::{Deserialize, Serialize};

use super::seed;
use crate::Singleton;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Singleton)]
#[serde(default, rename_all = "camelCase")]
#[singleton(storage_key = "site-settings", validate = "SiteSettings::check")]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub logo: String,
    pub favicon: String,
    pub meta_description: String,
    pub primary_color: String,
    pub social_links: SocialLinks,
}

impl Default for SiteSettings {
    fn default() -> Self {
        seed::site_settings()
    }
}

impl SiteSettings {
    fn check(&self) -> Result<(), String> {
        if self.site_name.trim().is_empty() {
            return Err("siteName must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Singleton)]
#[serde(default, rename_all = "camelCase")]
#[singleton(storage_key = "contact-settings", validate = "ContactSettings::check")]
pub struct ContactSettings {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub opening_hours: String,
    pub map_url: Option<String>,
}

impl Default for ContactSettings {
    fn default() -> Self {
        seed::contact_settings()
    }
}

impl ContactSettings {
    fn check(&self) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err(format!("email {:?} is not an address", self.email));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Singleton)]
#[serde(default, rename_all = "camelCase")]
#[singleton(storage_key = "home-content")]
pub struct HomeContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_label: String,
    pub cta_link: String,
    pub highlights: Vec<String>,
}

impl Default for HomeContent {
    fn default() -> Self {
        seed::home_content()
    }
}
