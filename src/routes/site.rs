// ABOUTME: Site facts route exposing name, contact, payment options, and navigation paths
// ABOUTME: Lets the presentation layer render links without hardcoding them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::constants::conversion::{DEFAULT_DONATION_AMOUNT, MIN_DONATION_AMOUNT};
use crate::constants::site;

/// One navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link label
    pub label: String,
    /// Canonical path
    pub path: String,
}

/// One social profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Network name
    pub network: String,
    /// Profile URL
    pub url: String,
}

/// Public facts about the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    /// Organisation name
    pub name: String,
    /// Tagline
    pub description: String,
    /// Support mailbox
    pub contact_email: String,
    /// Social profiles
    pub social_links: Vec<SocialLink>,
    /// Accepted payment methods
    pub payment_options: Vec<String>,
    /// Smallest accepted donation
    pub min_donation_amount: f64,
    /// Amount prefilled in the donation form
    pub default_donation_amount: f64,
    /// Canonical navigation paths
    pub navigation: Vec<NavLink>,
}

impl SiteInfo {
    /// Build from the site constants
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: site::SITE_NAME.to_owned(),
            description: site::SITE_DESCRIPTION.to_owned(),
            contact_email: site::CONTACT_EMAIL.to_owned(),
            social_links: site::SOCIAL_LINKS
                .iter()
                .map(|&(network, url)| SocialLink {
                    network: network.to_owned(),
                    url: url.to_owned(),
                })
                .collect(),
            payment_options: site::PAYMENT_OPTIONS
                .iter()
                .map(|&option| option.to_owned())
                .collect(),
            min_donation_amount: MIN_DONATION_AMOUNT,
            default_donation_amount: DEFAULT_DONATION_AMOUNT,
            navigation: site::NAVIGATION
                .iter()
                .map(|&(label, path)| NavLink {
                    label: label.to_owned(),
                    path: path.to_owned(),
                })
                .collect(),
        }
    }
}

/// Site routes implementation
pub struct SiteRoutes;

impl SiteRoutes {
    /// Create all site routes
    pub fn routes() -> Router {
        Router::new().route("/api/site", get(Self::site_info))
    }

    async fn site_info() -> Json<SiteInfo> {
        Json(SiteInfo::current())
    }
}
