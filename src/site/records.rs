//! Collection records of the agency site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::seed;
use crate::Record;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Missing ids and timestamps deserialize to empty and epoch values, so a
// stored record reads the same in every context.
fn stamp_id(id: &mut String) {
    if id.is_empty() {
        *id = new_id();
    }
}

fn stamp_time(at: &mut DateTime<Utc>) {
    if *at == DateTime::<Utc>::default() {
        *at = Utc::now();
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), String> {
    if !value.contains('@') {
        return Err(format!("email {:?} is not an address", value));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(storage_key = "services", defaults = "seed::services", validate = "Service::check")]
pub struct Service {
    #[record(key)]
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub icon: String,
    pub features: Vec<String>,
}

impl Service {
    fn check(&self) -> Result<(), String> {
        require("slug", &self.slug)?;
        require("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(storage_key = "case-studies", defaults = "seed::case_studies", validate = "CaseStudy::check")]
pub struct CaseStudy {
    #[record(key)]
    pub slug: String,
    pub title: String,
    pub client: String,
    pub industry: String,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<String>,
    pub services: Vec<String>,
    pub image: String,
}

impl CaseStudy {
    fn check(&self) -> Result<(), String> {
        require("slug", &self.slug)?;
        require("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(storage_key = "apps", defaults = "seed::apps", validate = "App::check")]
pub struct App {
    #[record(key)]
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub category: String,
    pub url: String,
}

impl App {
    fn check(&self) -> Result<(), String> {
        require("slug", &self.slug)?;
        require("name", &self.name)
    }
}

/// A client testimonial. Ratings run from 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "reviews",
    update = "merge",
    defaults = "seed::reviews",
    validate = "Review::check",
    on_create = "Review::stamp"
)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub company: String,
    pub rating: u8,
    pub content: String,
    pub featured: bool,
}

impl Default for Review {
    fn default() -> Self {
        Self {
            id: String::new(),
            author: String::new(),
            company: String::new(),
            rating: 5,
            content: String::new(),
            featured: false,
        }
    }
}

impl Review {
    pub fn new(author: impl Into<String>, rating: u8, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            author: author.into(),
            rating,
            content: content.into(),
            ..Self::default()
        }
    }

    fn stamp(&mut self) {
        stamp_id(&mut self.id);
    }

    fn check(&self) -> Result<(), String> {
        require("id", &self.id)?;
        if !(1..=5).contains(&self.rating) {
            return Err(format!("rating must be between 1 and 5, got {}", self.rating));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "pricing-plans",
    update = "merge",
    duplicates = "reject",
    defaults = "seed::pricing_plans",
    validate = "PricingPlan::check"
)]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub billing_period: String,
    pub features: Vec<String>,
    pub highlighted: bool,
}

impl PricingPlan {
    fn check(&self) -> Result<(), String> {
        require("id", &self.id)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be non-negative, got {}", self.price));
        }
        Ok(())
    }
}

/// A contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "messages",
    update = "merge",
    duplicates = "reject",
    validate = "Message::check",
    on_create = "Message::stamp"
)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(name: impl Into<String>, email: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            email: email.into(),
            body: body.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    fn stamp(&mut self) {
        stamp_id(&mut self.id);
        stamp_time(&mut self.created_at);
    }

    fn check(&self) -> Result<(), String> {
        require("id", &self.id)?;
        require_email(&self.email)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Editor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "users",
    update = "merge",
    duplicates = "reject",
    defaults = "seed::users",
    validate = "User::check",
    on_create = "User::stamp"
)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            email: email.into(),
            role,
            ..Self::default()
        }
    }

    fn stamp(&mut self) {
        stamp_id(&mut self.id);
    }

    fn check(&self) -> Result<(), String> {
        require("id", &self.id)?;
        require_email(&self.email)
    }
}

/// Long-form content, typically produced by the content generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "articles",
    duplicates = "reject",
    validate = "Article::check",
    on_create = "Article::stamp"
)]
pub struct Article {
    #[record(key)]
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub keywords: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    fn stamp(&mut self) {
        stamp_time(&mut self.created_at);
    }

    fn check(&self) -> Result<(), String> {
        require("slug", &self.slug)?;
        require("title", &self.title)
    }
}

/// Search metadata for one public page, keyed by page name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default, rename_all = "camelCase")]
#[record(
    storage_key = "page-seo",
    update = "merge",
    duplicates = "reject",
    defaults = "seed::page_seo",
    validate = "PageSeo::check"
)]
pub struct PageSeo {
    #[record(key)]
    pub page: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
}

impl PageSeo {
    fn check(&self) -> Result<(), String> {
        require("page", &self.page)
    }
}
