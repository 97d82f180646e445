//! Core types for the budget assistant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for generated messages and tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }

    /// Format a money amount the way this locale displays it
    pub fn format_amount(&self, amount: f64) -> String {
        match self {
            Locale::En => format!("{:.2}", amount),
            Locale::Tr => format!("{:.2} ₺", amount),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "tr" | "turkish" => Ok(Locale::Tr),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// Direction of a category's spending versus the previous month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increased,
    Decreased,
    Stable,
}

impl Trend {
    /// Classify `current` against `previous`; exact equality is stable
    pub fn classify(current: f64, previous: f64) -> Self {
        if current > previous {
            Trend::Increased
        } else if current < previous {
            Trend::Decreased
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increased => "increased",
            Trend::Decreased => "decreased",
            Trend::Stable => "stable",
        }
    }

    /// Short human label
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Trend::Increased, Locale::En) => "Increase",
            (Trend::Decreased, Locale::En) => "Decrease",
            (Trend::Stable, Locale::En) => "Stable",
            (Trend::Increased, Locale::Tr) => "Artış",
            (Trend::Decreased, Locale::Tr) => "Azalış",
            (Trend::Stable, Locale::Tr) => "Sabit",
        }
    }

    /// Terminal glyph for the trend
    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Increased => "↑",
            Trend::Decreased => "↓",
            Trend::Stable => "=",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-over-month finding for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInsight {
    pub category: String,
    pub current_spending: f64,
    pub previous_spending: f64,
    pub trend: Trend,
    pub message: String,
    /// Suggested spending limit for the category
    pub suggestion: f64,
}

impl BudgetInsight {
    /// Signed change versus last month in percent (0 without a previous month)
    pub fn percentage_change(&self) -> f64 {
        if self.previous_spending > 0.0 {
            (self.current_spending - self.previous_spending) / self.previous_spending * 100.0
        } else {
            0.0
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.current_spending > self.suggestion
    }

    /// Share of the suggested limit already spent, capped at 100
    pub fn progress_percentage(&self) -> f64 {
        if self.suggestion > 0.0 {
            (self.current_spending / self.suggestion * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    pub fn remaining_budget(&self) -> f64 {
        (self.suggestion - self.current_spending).max(0.0)
    }

    /// Amount that could be saved by returning to last month's level
    pub fn saving_opportunity(&self) -> f64 {
        if self.trend == Trend::Increased {
            self.current_spending - self.previous_spending
        } else {
            0.0
        }
    }
}

/// Suggested limit and current spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: String,
    pub suggested_amount: f64,
    pub current_amount: f64,
    /// 0.0-1.0; 1.0 when there is no positive suggestion
    pub progress: f64,
}

impl CategoryBudget {
    pub fn from_insight(insight: &BudgetInsight) -> Self {
        let progress = if insight.suggestion > 0.0 {
            (insight.current_spending / insight.suggestion).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Self {
            category: insight.category.clone(),
            suggested_amount: insight.suggestion,
            current_amount: insight.current_spending,
            progress,
        }
    }
}

/// Result of one budget analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnalysis {
    pub total_spending: f64,
    pub biggest_category: String,
    pub savings_potential: f64,
    pub insights: Vec<BudgetInsight>,
    pub suggested_budgets: Vec<CategoryBudget>,
}

impl MonthlyAnalysis {
    /// Headline shown above the insights
    pub fn main_message(&self, locale: Locale) -> String {
        if self.savings_potential > 0.0 {
            let amount = locale.format_amount(self.savings_potential);
            match locale {
                Locale::En => format!("We found {} of potential savings this month!", amount),
                Locale::Tr => format!("Bu ay {} tasarruf potansiyeli tespit ettik!", amount),
            }
        } else {
            match locale {
                Locale::En => "Great! You are managing your budget well.".to_string(),
                Locale::Tr => "Harika! Bütçenizi iyi yönetiyorsunuz.".to_string(),
            }
        }
    }
}
