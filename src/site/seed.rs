//! Built-in content written on first load.
//!
//! Seed records use fixed ids so every fresh storage area starts from the
//! same state.

use super::records::{App, CaseStudy, PageSeo, PricingPlan, Review, Service, User, UserRole};
use super::settings::{ContactSettings, HomeContent, SiteSettings, SocialLinks};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn services() -> Vec<Service> {
    vec![
        Service {
            slug: "seo".into(),
            title: "Search Engine Optimization".into(),
            summary: "Rank higher and win organic traffic.".into(),
            description: "Technical audits, on-page optimization and content strategy built around the searches your customers make.".into(),
            icon: "search".into(),
            features: strings(&["Technical audit", "Keyword research", "On-page optimization", "Monthly reporting"]),
        },
        Service {
            slug: "ppc".into(),
            title: "Pay-Per-Click Advertising".into(),
            summary: "Paid campaigns that pay for themselves.".into(),
            description: "Search and display campaigns managed against a cost-per-acquisition target.".into(),
            icon: "target".into(),
            features: strings(&["Campaign setup", "Bid management", "A/B ad testing", "Conversion tracking"]),
        },
        Service {
            slug: "social-media".into(),
            title: "Social Media Marketing".into(),
            summary: "Grow an audience that converts.".into(),
            description: "Content calendars, community management and paid social across the networks your audience uses.".into(),
            icon: "share".into(),
            features: strings(&["Content calendar", "Community management", "Paid social", "Analytics"]),
        },
        Service {
            slug: "web-design".into(),
            title: "Web Design & Development".into(),
            summary: "Fast sites built to convert.".into(),
            description: "Responsive websites and landing pages designed around clear calls to action.".into(),
            icon: "layout".into(),
            features: strings(&["Responsive design", "Landing pages", "Performance tuning", "CMS integration"]),
        },
    ]
}

pub(crate) fn case_studies() -> Vec<CaseStudy> {
    vec![
        CaseStudy {
            slug: "greenleaf-organics".into(),
            title: "Tripling organic traffic for an online grocer".into(),
            client: "GreenLeaf Organics".into(),
            industry: "E-commerce".into(),
            challenge: "Product pages were invisible in search.".into(),
            solution: "Technical SEO overhaul and a recipe content hub.".into(),
            results: strings(&["212% more organic sessions", "48% more online orders"]),
            services: strings(&["seo", "web-design"]),
            image: "/images/case-studies/greenleaf.jpg".into(),
        },
        CaseStudy {
            slug: "summit-legal".into(),
            title: "Halving cost per lead for a law firm".into(),
            client: "Summit Legal".into(),
            industry: "Professional services".into(),
            challenge: "Paid search spend was rising with flat lead volume.".into(),
            solution: "Restructured campaigns around high-intent keywords.".into(),
            results: strings(&["52% lower cost per lead", "2.4x more consultations"]),
            services: strings(&["ppc"]),
            image: "/images/case-studies/summit.jpg".into(),
        },
        CaseStudy {
            slug: "urban-fit".into(),
            title: "Building a social community for a gym chain".into(),
            client: "Urban Fit".into(),
            industry: "Fitness".into(),
            challenge: "Low engagement and no social-driven signups.".into(),
            solution: "Member stories and a referral campaign on social.".into(),
            results: strings(&["35k new followers", "1,100 trial signups"]),
            services: strings(&["social-media"]),
            image: "/images/case-studies/urban-fit.jpg".into(),
        },
    ]
}

pub(crate) fn apps() -> Vec<App> {
    vec![
        App {
            slug: "seo-audit".into(),
            name: "SEO Audit".into(),
            tagline: "Find what holds your site back.".into(),
            description: "Crawls a page and reports missing metadata, slow assets and broken links.".into(),
            category: "seo".into(),
            url: "/apps/seo-audit".into(),
        },
        App {
            slug: "ad-copy-generator".into(),
            name: "Ad Copy Generator".into(),
            tagline: "Headlines that get clicks.".into(),
            description: "Drafts search ad headlines and descriptions from a product brief.".into(),
            category: "ppc".into(),
            url: "/apps/ad-copy-generator".into(),
        },
        App {
            slug: "content-planner".into(),
            name: "Content Planner".into(),
            tagline: "A month of posts in minutes.".into(),
            description: "Builds a social content calendar around your key dates.".into(),
            category: "social-media".into(),
            url: "/apps/content-planner".into(),
        },
    ]
}

pub(crate) fn reviews() -> Vec<Review> {
    vec![
        Review {
            id: "review-1".into(),
            author: "Maria Lopez".into(),
            company: "GreenLeaf Organics".into(),
            rating: 5,
            content: "Our organic traffic tripled in six months.".into(),
            featured: true,
        },
        Review {
            id: "review-2".into(),
            author: "James Carter".into(),
            company: "Summit Legal".into(),
            rating: 5,
            content: "More consultations for half the ad spend.".into(),
            featured: true,
        },
        Review {
            id: "review-3".into(),
            author: "Priya Shah".into(),
            company: "Urban Fit".into(),
            rating: 4,
            content: "Our social channels finally feel alive.".into(),
            featured: false,
        },
    ]
}

pub(crate) fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            id: "starter".into(),
            name: "Starter".into(),
            price: 499.0,
            billing_period: "month".into(),
            features: strings(&["SEO audit", "One channel", "Monthly report"]),
            highlighted: false,
        },
        PricingPlan {
            id: "growth".into(),
            name: "Growth".into(),
            price: 1299.0,
            billing_period: "month".into(),
            features: strings(&["Everything in Starter", "Three channels", "Dedicated strategist"]),
            highlighted: true,
        },
        PricingPlan {
            id: "enterprise".into(),
            name: "Enterprise".into(),
            price: 2999.0,
            billing_period: "month".into(),
            features: strings(&["Everything in Growth", "All channels", "Weekly reporting"]),
            highlighted: false,
        },
    ]
}

pub(crate) fn users() -> Vec<User> {
    vec![User {
        id: "user-admin".into(),
        name: "Site Admin".into(),
        email: "admin@example.com".into(),
        role: UserRole::Admin,
        avatar: None,
    }]
}

/// Public pages that carry their own search metadata.
pub const PUBLIC_PAGES: [&str; 8] = [
    "home",
    "services",
    "case-studies",
    "apps",
    "pricing",
    "about",
    "blog",
    "contact",
];

pub(crate) fn page_seo() -> Vec<PageSeo> {
    PUBLIC_PAGES
        .iter()
        .map(|page| {
            let title = match *page {
                "home" => "Digital Marketing Agency".to_string(),
                "case-studies" => "Case Studies".to_string(),
                other => {
                    let mut chars = other.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                }
            };
            PageSeo {
                page: page.to_string(),
                description: format!("{} | Digital Marketing Agency", title),
                title,
                keywords: strings(&["digital marketing", "seo", "ppc"]),
                og_image: None,
            }
        })
        .collect()
}

pub(crate) fn site_settings() -> SiteSettings {
    SiteSettings {
        site_name: "Digital Marketing Agency".into(),
        tagline: "Growth you can measure.".into(),
        logo: "/logo.svg".into(),
        favicon: "/favicon.ico".into(),
        meta_description: "A full-service digital marketing agency: SEO, paid advertising, social media and web design.".into(),
        primary_color: "#2563eb".into(),
        social_links: SocialLinks {
            facebook: Some("https://facebook.com/agency".into()),
            twitter: Some("https://twitter.com/agency".into()),
            linkedin: Some("https://linkedin.com/company/agency".into()),
            instagram: None,
        },
    }
}

pub(crate) fn contact_settings() -> ContactSettings {
    ContactSettings {
        email: "hello@example.com".into(),
        phone: "+1 555 0100".into(),
        address: "100 Market Street, Suite 300, San Francisco, CA".into(),
        opening_hours: "Mon-Fri 9:00-18:00".into(),
        map_url: None,
    }
}

pub(crate) fn home_content() -> HomeContent {
    HomeContent {
        hero_title: "Marketing that moves the numbers".into(),
        hero_subtitle: "SEO, paid media and social campaigns run by people who report on revenue, not vanity metrics.".into(),
        cta_label: "Get a free audit".into(),
        cta_link: "/contact".into(),
        highlights: strings(&["120+ clients", "8 years in business", "4.9 average rating"]),
    }
}
