//! The agency site's content: every domain store over one browsing context.
//!
//! `Site` is built once at the application root and handed to whatever
//! renders or administers content. Dropping it (and every clone of its
//! stores) detaches the stores from cross-context sync.

mod records;
pub mod seed;
mod settings;

use std::time::Duration;

use tracing::info;

pub use records::{App, Article, CaseStudy, Message, PageSeo, PricingPlan, Review, Service, User, UserRole};
pub use settings::{ContactSettings, HomeContent, SiteSettings, SocialLinks};

use crate::config::{ContentConfig, DEFAULT_SYNC_INTERVAL};
use crate::error::StoreError;
use crate::registry::StoreRegistry;
use crate::storage::BrowsingContext;
use crate::store::{CollectionStore, SingletonStore};
use crate::sync::SyncThread;

pub struct Site {
    context: BrowsingContext,
    registry: StoreRegistry,
    sync_interval: Duration,
    services: CollectionStore<Service>,
    case_studies: CollectionStore<CaseStudy>,
    apps: CollectionStore<App>,
    reviews: CollectionStore<Review>,
    pricing_plans: CollectionStore<PricingPlan>,
    messages: CollectionStore<Message>,
    users: CollectionStore<User>,
    articles: CollectionStore<Article>,
    page_seo: CollectionStore<PageSeo>,
    site_settings: SingletonStore<SiteSettings>,
    contact_settings: SingletonStore<ContactSettings>,
    home_content: SingletonStore<HomeContent>,
}

impl Site {
    /// Open and hydrate every store over `context`.
    pub fn open(context: &BrowsingContext) -> Result<Self, StoreError> {
        Self::open_with_interval(context, DEFAULT_SYNC_INTERVAL)
    }

    fn open_with_interval(context: &BrowsingContext, sync_interval: Duration) -> Result<Self, StoreError> {
        let site = Self {
            context: context.clone(),
            registry: StoreRegistry::new(),
            sync_interval,
            services: CollectionStore::new(context),
            case_studies: CollectionStore::new(context),
            apps: CollectionStore::new(context),
            reviews: CollectionStore::new(context),
            pricing_plans: CollectionStore::new(context),
            messages: CollectionStore::new(context),
            users: CollectionStore::new(context),
            articles: CollectionStore::new(context),
            page_seo: CollectionStore::new(context),
            site_settings: SingletonStore::new(context),
            contact_settings: SingletonStore::new(context),
            home_content: SingletonStore::new(context),
        };

        site.registry.register(site.services.clone())?;
        site.registry.register(site.case_studies.clone())?;
        site.registry.register(site.apps.clone())?;
        site.registry.register(site.reviews.clone())?;
        site.registry.register(site.pricing_plans.clone())?;
        site.registry.register(site.messages.clone())?;
        site.registry.register(site.users.clone())?;
        site.registry.register(site.articles.clone())?;
        site.registry.register(site.page_seo.clone())?;
        site.registry.register(site.site_settings.clone())?;
        site.registry.register(site.contact_settings.clone())?;
        site.registry.register(site.home_content.clone())?;

        site.registry.hydrate_all();
        info!(context = %context.id(), stores = site.registry.len(), "site content ready");
        Ok(site)
    }

    /// Open the configured storage area and a fresh context on it. The
    /// config's sync interval drives [`start_sync`](Self::start_sync).
    pub fn from_config(config: &ContentConfig) -> Result<Self, StoreError> {
        let area = config.open_area();
        Self::open_with_interval(&area.open_context(), config.sync_interval)
    }

    pub fn sync_interval(&self) -> Duration {
        self.sync_interval
    }

    /// Keep this site in sync with other contexts from a background thread,
    /// polling at the configured interval.
    pub fn start_sync(&self) -> SyncThread {
        self.spawn_sync(self.sync_interval)
    }

    /// Like [`start_sync`](Self::start_sync) with an explicit interval.
    pub fn spawn_sync(&self, interval: Duration) -> SyncThread {
        SyncThread::spawn(self.registry.clone(), interval)
    }

    pub fn context(&self) -> &BrowsingContext {
        &self.context
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Process pending changes from other contexts for every store.
    pub fn sync(&self) -> usize {
        self.registry.sync_all()
    }

    pub fn services(&self) -> &CollectionStore<Service> {
        &self.services
    }

    pub fn case_studies(&self) -> &CollectionStore<CaseStudy> {
        &self.case_studies
    }

    pub fn apps(&self) -> &CollectionStore<App> {
        &self.apps
    }

    pub fn reviews(&self) -> &CollectionStore<Review> {
        &self.reviews
    }

    pub fn pricing_plans(&self) -> &CollectionStore<PricingPlan> {
        &self.pricing_plans
    }

    pub fn messages(&self) -> &CollectionStore<Message> {
        &self.messages
    }

    pub fn users(&self) -> &CollectionStore<User> {
        &self.users
    }

    pub fn articles(&self) -> &CollectionStore<Article> {
        &self.articles
    }

    pub fn page_seo(&self) -> &CollectionStore<PageSeo> {
        &self.page_seo
    }

    pub fn site_settings(&self) -> &SingletonStore<SiteSettings> {
        &self.site_settings
    }

    pub fn contact_settings(&self) -> &SingletonStore<ContactSettings> {
        &self.contact_settings
    }

    pub fn home_content(&self) -> &SingletonStore<HomeContent> {
        &self.home_content
    }
}
