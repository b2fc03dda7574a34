// ABOUTME: Application-wide constants for the ShareBites service
// ABOUTME: Site facts, the fixed donation conversion policy, canned chat texts, and form limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Constants Module
//!
//! Hardcoded values shared by the contract layer, the flows, and the HTTP
//! surface. Values that operators may tune live in the server configuration
//! instead.

/// Public facts about the organisation
pub mod site {
    /// Organisation name
    pub const SITE_NAME: &str = "ShareBites";
    /// Tagline
    pub const SITE_DESCRIPTION: &str = "Fighting Hunger One Bite at a Time.";
    /// Support mailbox
    pub const CONTACT_EMAIL: &str = "support@sharebites.org";

    /// Social profiles as `(network, url)`
    pub const SOCIAL_LINKS: &[(&str, &str)] = &[
        ("facebook", "https://facebook.com/sharebites"),
        ("instagram", "https://instagram.com/sharebites"),
        ("linkedin", "https://linkedin.com/company/sharebites"),
    ];

    /// Accepted payment methods for monetary donations
    pub const PAYMENT_OPTIONS: &[&str] = &[
        "Credit/Debit Card",
        "PayPal",
        "Cash App",
        "UPI/Online Transfer",
    ];

    /// Canonical navigation paths as `(label, path)`
    pub const NAVIGATION: &[(&str, &str)] = &[
        ("Home", "/"),
        ("About", "/about"),
        ("Donate", "/donate"),
        ("Pledge Food", "/donate#food-pledge"),
        ("Impact", "/impact"),
        ("Support", "/support"),
    ];
}

/// Fixed donation conversion policy (1 unit => 2 meals => 0.5 families)
pub mod conversion {
    /// Meals provided per currency unit
    pub const MEALS_PER_UNIT: f64 = 2.0;
    /// Families fed per currency unit
    pub const FAMILIES_PER_UNIT: f64 = 0.5;
    /// Absolute tolerance when comparing a model estimate to the reference
    pub const CONSISTENCY_TOLERANCE: f64 = 0.5;
    /// Smallest amount the donation form accepts for a real donation
    pub const MIN_DONATION_AMOUNT: f64 = 1.0;
    /// Amount prefilled in the donation form
    pub const DEFAULT_DONATION_AMOUNT: f64 = 25.0;
}

/// Canned texts used by the chat widget and chat flow
pub mod chat {
    /// Greeting seeded into a fresh transcript (display only)
    pub const GREETING: &str =
        "Hello! I'm ShareBot, your assistant for ShareBites. How can I help you today?";

    /// Model acknowledgment turn that follows the system context on every call
    pub const CONTEXT_ACKNOWLEDGMENT: &str =
        "Understood. I am ShareBot, your helpful assistant for ShareBites. How can I assist you today?";

    /// Substituted when the model returns no usable text
    pub const EMPTY_RESPONSE_FALLBACK: &str =
        "I'm sorry, I couldn't generate a response. Please try again.";

    /// Substituted into the transcript when the generation call fails
    pub const ERROR_APOLOGY: &str = "Sorry, I encountered an error. Please try again later.";

    /// Sampling temperature for support chat
    pub const TEMPERATURE: f32 = 0.6;
}

/// User-facing notices for the donation estimator
pub mod notices {
    /// Shown when a donation estimate could not be produced
    pub const ESTIMATE_FAILED: &str = "Could not calculate impact. Please try again.";
}

/// Acknowledgment texts for the site forms
pub mod forms {
    /// Shown after a food pledge is accepted
    pub const PLEDGE_THANKS: &str =
        "Thank you for your generous pledge. We will contact you shortly regarding pickup/delivery.";
    /// Shown after a support message is accepted
    pub const SUPPORT_THANKS: &str =
        "Thank you for reaching out. Our support team will get back to you soon.";
}

/// Field limits for the contract layer and forms
pub mod limits {
    /// Minimum characters in an impact trend narrative
    pub const MIN_TREND_NARRATIVE_CHARS: usize = 20;
    /// Minimum characters in a contact name
    pub const MIN_NAME_CHARS: usize = 2;
    /// Minimum characters in a pledged food type
    pub const MIN_FOOD_TYPE_CHARS: usize = 3;
    /// Minimum characters in a support subject
    pub const MIN_SUBJECT_CHARS: usize = 3;
    /// Minimum characters in a support message
    pub const MIN_SUPPORT_MESSAGE_CHARS: usize = 10;
    /// Upper bound on a single chat message
    pub const MAX_CHAT_MESSAGE_CHARS: usize = 4_000;
}

/// Snapshot shown on the impact page before anyone edits the form
pub mod impact_defaults {
    /// Meals distributed to date
    pub const MEALS_DISTRIBUTED: f64 = 15_230.0;
    /// Money raised to date
    pub const MONEY_RAISED: f64 = 7_615.0;
    /// Number of donors to date
    pub const NUMBER_OF_DONORS: f64 = 350.0;
    /// Narrative prefilled into the analysis form
    pub const MONTHLY_TRENDS: &str = "Donations saw a 20% increase in December, possibly due to holiday season. Meal distribution peaked in January. Overall steady growth in donor engagement throughout the year.";

    /// Monthly chart series as `(month, donations, meals)`
    pub const MONTHLY_SERIES: &[(&str, f64, f64)] = &[
        ("Jan", 1_200.0, 2_400.0),
        ("Feb", 900.0, 1_800.0),
        ("Mar", 1_500.0, 3_000.0),
        ("Apr", 1_300.0, 2_600.0),
        ("May", 1_600.0, 3_200.0),
        ("Jun", 1_800.0, 3_600.0),
    ];

    /// Progress-bar goals as `(meals, money, donors)`
    pub const GOALS: (f64, f64, f64) = (20_000.0, 10_000.0, 500.0);
}
