//! Budget Assistant
//!
//! Compares each expense category's spending this month against the month
//! before, classifies the trend, and proposes a spending limit:
//!
//! - spending grew past the increase threshold: pull back toward last month
//!   plus tolerance
//! - spending fell below the decrease threshold: lock in the savings plus
//!   tolerance
//! - otherwise: keep the current level

use tracing::debug;

use crate::aggregate::{group_by_category, month_over_month, total_by_type};
use crate::models::{PlannedPayment, Transaction, TransactionType, DEFAULT_CATEGORY};

use super::types::{BudgetInsight, CategoryBudget, Locale, MonthlyAnalysis, Trend};

const GENERAL_TIPS_EN: [&str; 5] = [
    "Track your spending regularly and avoid unnecessary purchases.",
    "Make a list before shopping and skip anything that is not on it.",
    "Put your bills on automatic payment to avoid late fees.",
    "Use public transport to save on fuel costs.",
    "Do your grocery shopping on discount days.",
];

const GENERAL_TIPS_TR: [&str; 5] = [
    "Düzenli olarak harcamalarınızı takip edin ve gereksiz harcamalardan kaçının.",
    "Alışveriş yapmadan önce liste hazırlayın ve listede olmayan ürünleri almayın.",
    "Faturalarınızı otomatik ödemeye alarak gecikme cezalarından kaçının.",
    "Toplu taşıma kullanarak yakıt masraflarından tasarruf edin.",
    "Market alışverişlerinizi indirim günlerinde yapın.",
];

/// Generates budget insights and suggested limits from transactions
#[derive(Debug, Clone)]
pub struct BudgetAssistant {
    /// current > previous * this counts as overspending (default 1.2)
    increase_threshold: f64,
    /// current < previous * this counts as saving (default 0.8)
    decrease_threshold: f64,
    /// Headroom multiplier applied to suggested limits (default 1.1)
    tolerance: f64,
    locale: Locale,
}

impl BudgetAssistant {
    pub fn new() -> Self {
        Self {
            increase_threshold: 1.2,
            decrease_threshold: 0.8,
            tolerance: 1.1,
            locale: Locale::default(),
        }
    }

    pub fn with_thresholds(increase: f64, decrease: f64, tolerance: f64) -> Self {
        Self {
            increase_threshold: increase,
            decrease_threshold: decrease,
            tolerance,
            ..Self::new()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Analyze spending for `current_month` (1-12)
    ///
    /// Planned payments are part of the input but do not change the result.
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        _planned_payments: &[PlannedPayment],
        current_month: u32,
    ) -> MonthlyAnalysis {
        let insights = self.insights(transactions, current_month);
        let suggested_budgets: Vec<CategoryBudget> =
            insights.iter().map(CategoryBudget::from_insight).collect();

        let total_spending = total_by_type(transactions, TransactionType::Expense);
        let total_suggested: f64 = suggested_budgets.iter().map(|b| b.suggested_amount).sum();
        let savings_potential = (total_spending - total_suggested).max(0.0);

        let biggest_category = biggest_category(&insights);

        debug!(
            "Analyzed {} categories for month {}: total {:.2}, potential {:.2}",
            insights.len(),
            current_month,
            total_spending,
            savings_potential
        );

        MonthlyAnalysis {
            total_spending,
            biggest_category,
            savings_potential,
            insights,
            suggested_budgets,
        }
    }

    /// One insight per expense category, ordered by category name
    pub fn insights(&self, transactions: &[Transaction], current_month: u32) -> Vec<BudgetInsight> {
        let expenses: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.is_expense())
            .cloned()
            .collect();

        group_by_category(&expenses)
            .into_keys()
            .map(|category| {
                let (current, previous) = month_over_month(&expenses, &category, current_month);
                let trend = Trend::classify(current, previous);
                let message = self.message(&category, current, previous, trend);

                BudgetInsight {
                    category,
                    current_spending: current,
                    previous_spending: previous,
                    trend,
                    message,
                    suggestion: self.suggested_limit(current, previous),
                }
            })
            .collect()
    }

    /// Proposed spending limit given this and last month's spending
    pub fn suggested_limit(&self, current: f64, previous: f64) -> f64 {
        if current > previous * self.increase_threshold {
            previous * self.tolerance
        } else if current < previous * self.decrease_threshold {
            current * self.tolerance
        } else {
            current
        }
    }

    fn message(&self, category: &str, current: f64, previous: f64, trend: Trend) -> String {
        let change = if previous > 0.0 {
            (current - previous).abs() / previous * 100.0
        } else {
            0.0
        };

        match (self.locale, trend) {
            (Locale::En, Trend::Increased) => format!(
                "You spent {:.1}% more on {} than last month.",
                change, category
            ),
            (Locale::En, Trend::Decreased) => format!(
                "You spent {:.1}% less on {} than last month.",
                change, category
            ),
            (Locale::En, Trend::Stable) => format!(
                "Your {} spending is at the same level as last month ({:.1}% change).",
                category, change
            ),
            (Locale::Tr, Trend::Increased) => format!(
                "{} kategorisinde geçen aya göre %{:.1} daha fazla harcama yaptınız.",
                category, change
            ),
            (Locale::Tr, Trend::Decreased) => format!(
                "{} kategorisinde geçen aya göre %{:.1} daha az harcama yaptınız.",
                category, change
            ),
            (Locale::Tr, Trend::Stable) => format!(
                "{} kategorisindeki harcamalarınız geçen ayla aynı seviyede (%{:.1} değişim).",
                category, change
            ),
        }
    }

    /// Actionable tips drawn from a set of insights
    ///
    /// At most three: the increased category with the highest spending, the
    /// category with the largest decrease, and the overall direction.
    pub fn saving_tips(&self, insights: &[BudgetInsight]) -> Vec<String> {
        let mut tips = Vec::new();

        let top_increase = insights
            .iter()
            .filter(|i| i.trend == Trend::Increased)
            .fold(None, |best: Option<&BudgetInsight>, i| match best {
                Some(b) if b.current_spending >= i.current_spending => Some(b),
                _ => Some(i),
            });
        if let Some(insight) = top_increase {
            tips.push(match self.locale {
                Locale::En => format!(
                    "Your {} spending went up compared to last month. Consider reviewing this category.",
                    insight.category
                ),
                Locale::Tr => format!(
                    "{} harcamalarınız geçen aya göre artış gösterdi. Bu kategoriyi gözden geçirmenizi öneririz.",
                    insight.category
                ),
            });
        }

        let top_decrease = insights
            .iter()
            .filter(|i| i.trend == Trend::Decreased)
            .fold(None, |best: Option<&BudgetInsight>, i| match best {
                Some(b)
                    if b.previous_spending - b.current_spending
                        >= i.previous_spending - i.current_spending =>
                {
                    Some(b)
                }
                _ => Some(i),
            });
        if let Some(insight) = top_decrease {
            tips.push(match self.locale {
                Locale::En => format!(
                    "You saved successfully on {}. Keep it up!",
                    insight.category
                ),
                Locale::Tr => format!(
                    "{} kategorisinde başarılı bir tasarruf sağladınız. Bu şekilde devam edin!",
                    insight.category
                ),
            });
        }

        let current: f64 = insights.iter().map(|i| i.current_spending).sum();
        let previous: f64 = insights.iter().map(|i| i.previous_spending).sum();
        match (Trend::classify(current, previous), self.locale) {
            (Trend::Increased, Locale::En) => tips.push(
                "Your overall spending is up this month. Consider cutting unnecessary expenses."
                    .to_string(),
            ),
            (Trend::Increased, Locale::Tr) => tips.push(
                "Bu ay genel harcamalarınızda artış var. Gereksiz harcamaları azaltmayı düşünebilirsiniz."
                    .to_string(),
            ),
            (Trend::Decreased, Locale::En) => tips.push(
                "Congratulations! You reduced your overall spending this month.".to_string(),
            ),
            (Trend::Decreased, Locale::Tr) => tips.push(
                "Tebrikler! Bu ay genel harcamalarınızı azaltmayı başardınız.".to_string(),
            ),
            (Trend::Stable, _) => {}
        }

        tips
    }

    /// Longer explanation of a single insight
    pub fn detailed_analysis(&self, insight: &BudgetInsight) -> String {
        let change = insight.percentage_change().abs();
        let locale = self.locale;
        let mut analysis = String::new();

        match (insight.trend, locale) {
            (Trend::Increased, Locale::En) => {
                analysis.push_str(&format!(
                    "Spending in this category rose {:.1}% compared to last month. ",
                    change
                ));
                if insight.is_over_budget() {
                    analysis.push_str(&format!(
                        "You exceeded your budget by {}.",
                        locale.format_amount(insight.current_spending - insight.suggestion)
                    ));
                }
            }
            (Trend::Increased, Locale::Tr) => {
                analysis.push_str(&format!(
                    "Bu kategoride harcamalarınız geçen aya göre %{:.1} arttı. ",
                    change
                ));
                if insight.is_over_budget() {
                    analysis.push_str(&format!(
                        "Bütçenizi aştınız ve {} fazla harcama yaptınız.",
                        locale.format_amount(insight.current_spending - insight.suggestion)
                    ));
                }
            }
            (Trend::Decreased, Locale::En) => {
                analysis.push_str(&format!(
                    "Well done! Spending in this category fell {:.1}% compared to last month. ",
                    change
                ));
                analysis.push_str(&format!(
                    "Keep this up and you can save {} a month.",
                    locale.format_amount(insight.previous_spending - insight.current_spending)
                ));
            }
            (Trend::Decreased, Locale::Tr) => {
                analysis.push_str(&format!(
                    "Tebrikler! Bu kategoride harcamalarınız geçen aya göre %{:.1} azaldı. ",
                    change
                ));
                analysis.push_str(&format!(
                    "Bu şekilde devam ederseniz aylık {} tasarruf edebilirsiniz.",
                    locale.format_amount(insight.previous_spending - insight.current_spending)
                ));
            }
            (Trend::Stable, Locale::En) => {
                analysis.push_str("Spending in this category is similar to last month. ");
                if !insight.is_over_budget() {
                    analysis.push_str("You are on track with your budget goals.");
                }
            }
            (Trend::Stable, Locale::Tr) => {
                analysis.push_str("Bu kategorideki harcamalarınız geçen ayla benzer seviyede. ");
                if !insight.is_over_budget() {
                    analysis.push_str("Bütçe hedeflerinize uygun ilerliyorsunuz.");
                }
            }
        }

        analysis
    }

    /// Generic advice for a trend
    pub fn saving_tip_for(&self, trend: Trend) -> &'static str {
        match (trend, self.locale) {
            (Trend::Increased, Locale::En) => {
                "Look for cheaper alternatives in this category or postpone some purchases."
            }
            (Trend::Decreased, Locale::En) => {
                "Apply your successful saving strategy to other categories too."
            }
            (Trend::Stable, Locale::En) => {
                "Keep your steady spending habits and watch for opportunities."
            }
            (Trend::Increased, Locale::Tr) => {
                "Bu kategoride tasarruf için alternatif seçenekleri değerlendirebilir veya harcamalarınızı erteleyebilirsiniz."
            }
            (Trend::Decreased, Locale::Tr) => {
                "Başarılı tasarruf stratejinizi diğer kategorilere de uygulayabilirsiniz."
            }
            (Trend::Stable, Locale::Tr) => {
                "Düzenli harcama alışkanlığınızı koruyun ve fırsatları değerlendirin."
            }
        }
    }

    /// One of a fixed set of general tips, rotating by day
    pub fn general_tip(&self, day_index: u32) -> &'static str {
        let tips = match self.locale {
            Locale::En => &GENERAL_TIPS_EN,
            Locale::Tr => &GENERAL_TIPS_TR,
        };
        tips[day_index as usize % tips.len()]
    }
}

impl Default for BudgetAssistant {
    fn default() -> Self {
        Self::new()
    }
}

/// Category with the largest current-month spending
///
/// Insights arrive sorted by name, so keeping the first maximum breaks ties
/// toward the smallest name.
fn biggest_category(insights: &[BudgetInsight]) -> String {
    insights
        .iter()
        .fold(None, |best: Option<&BudgetInsight>, i| match best {
            Some(b) if b.current_spending >= i.current_spending => Some(b),
            _ => Some(i),
        })
        .map(|i| i.category.clone())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}
