//! Configuration module

mod site;

pub use site::{
    CategoryConfig, FooterConfig, HeroConfig, NavItem, NewsletterConfig, SiteConfig, Stat,
};
