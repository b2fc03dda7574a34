// ABOUTME: Impact-analysis request/result shapes and the impact page snapshot
// ABOUTME: Requests need positive metrics and a trend narrative of at least 20 characters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{check_non_blank, StructuredOutput};
use crate::constants::impact_defaults;
use crate::constants::limits::MIN_TREND_NARRATIVE_CHARS;
use crate::errors::{GenerationError, ValidationError};
use crate::validation::{require_min_chars, require_positive, Validate};

/// Snapshot of aggregate program metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysisRequest {
    /// Total meals distributed
    pub meals_distributed: f64,
    /// Total money raised
    pub money_raised: f64,
    /// Total number of donors
    pub number_of_donors: f64,
    /// Free-text summary of monthly trends
    pub monthly_trends: String,
}

impl Default for ImpactAnalysisRequest {
    fn default() -> Self {
        Self {
            meals_distributed: impact_defaults::MEALS_DISTRIBUTED,
            money_raised: impact_defaults::MONEY_RAISED,
            number_of_donors: impact_defaults::NUMBER_OF_DONORS,
            monthly_trends: impact_defaults::MONTHLY_TRENDS.to_owned(),
        }
    }
}

impl Validate for ImpactAnalysisRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_positive("mealsDistributed", self.meals_distributed)?;
        require_positive("moneyRaised", self.money_raised)?;
        require_positive("numberOfDonors", self.number_of_donors)?;
        require_min_chars(
            "monthlyTrends",
            &self.monthly_trends,
            MIN_TREND_NARRATIVE_CHARS,
        )
    }
}

/// Model-generated narrative analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysisResult {
    /// Overall summary
    pub summary: String,
    /// Ordered key insights
    pub key_insights: Vec<String>,
    /// Recommendations to improve impact
    pub recommendations: String,
}

impl StructuredOutput for ImpactAnalysisResult {
    const SCHEMA_NAME: &'static str = "ImpactAnalysisResult";

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "summary": {
                    "type": "STRING",
                    "description": "A summary of the overall impact of ShareBites."
                },
                "keyInsights": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Key insights derived from the impact data."
                },
                "recommendations": {
                    "type": "STRING",
                    "description": "Recommendations for ShareBites to improve its impact."
                }
            },
            "required": ["summary", "keyInsights", "recommendations"]
        })
    }

    fn check(&self) -> Result<(), GenerationError> {
        check_non_blank(Self::SCHEMA_NAME, "summary", &self.summary)?;
        for (index, insight) in self.key_insights.iter().enumerate() {
            check_non_blank(Self::SCHEMA_NAME, &format!("keyInsights[{index}]"), insight)?;
        }
        check_non_blank(Self::SCHEMA_NAME, "recommendations", &self.recommendations)
    }
}

/// One month of the impact chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Month label
    pub month: String,
    /// Money donated that month
    pub donations: f64,
    /// Meals distributed that month
    pub meals: f64,
}

/// Impact page snapshot: current metrics, chart series, and goal progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStats {
    /// Current metrics, usable as-is for an analysis request
    pub snapshot: ImpactAnalysisRequest,
    /// Monthly chart data
    pub monthly: Vec<MonthlyPoint>,
    /// Percent of the meals goal reached
    pub meals_progress: f64,
    /// Percent of the fundraising goal reached
    pub money_progress: f64,
    /// Percent of the donor goal reached
    pub donors_progress: f64,
}

impl ImpactStats {
    /// Build the page snapshot from a set of metrics
    #[must_use]
    pub fn from_snapshot(snapshot: ImpactAnalysisRequest) -> Self {
        let (meals_goal, money_goal, donors_goal) = impact_defaults::GOALS;
        Self {
            meals_progress: percent(snapshot.meals_distributed, meals_goal),
            money_progress: percent(snapshot.money_raised, money_goal),
            donors_progress: percent(snapshot.number_of_donors, donors_goal),
            monthly: impact_defaults::MONTHLY_SERIES
                .iter()
                .map(|&(month, donations, meals)| MonthlyPoint {
                    month: month.to_owned(),
                    donations,
                    meals,
                })
                .collect(),
            snapshot,
        }
    }
}

impl Default for ImpactStats {
    fn default() -> Self {
        Self::from_snapshot(ImpactAnalysisRequest::default())
    }
}

fn percent(value: f64, goal: f64) -> f64 {
    (value / goal * 100.0).min(100.0)
}
