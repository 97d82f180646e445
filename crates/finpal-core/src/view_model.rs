//! View-model: the consistent snapshot the UI reads from
//!
//! Every mutation writes through to the database, re-fetches both lists and
//! recomputes all derived state from scratch. Nothing derived is cached
//! across mutations, so the published values always match the stored data.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::aggregate::{self, SearchScope};
use crate::db::Database;
use crate::error::Result;
use crate::insights::{
    BudgetAssistant, BudgetInsight, CategoryBudget, Locale, MonthlyAnalysis, Prediction,
    SpendingPredictor,
};
use crate::models::{
    CategoryExpense, MonthSummary, NewPlannedPayment, NewTransaction, PaymentMonthSummary,
    PlannedPayment, Transaction, TransactionType, UserProfile,
};
use crate::settings::{PreferenceStore, Settings};

pub struct ViewModel<S: PreferenceStore> {
    db: Database,
    settings: Settings<S>,
    assistant: BudgetAssistant,
    predictor: SpendingPredictor,
    reference_date: Option<NaiveDate>,

    transactions: Vec<Transaction>,
    planned_payments: Vec<PlannedPayment>,
    search_text: String,
    search_scope: SearchScope,

    filtered_transactions: Vec<Transaction>,
    balance: f64,
    category_expenses: Vec<CategoryExpense>,
    analysis: MonthlyAnalysis,
    current_saving_tip: Option<String>,
}

impl<S: PreferenceStore> ViewModel<S> {
    /// Load both lists from the database and compute the first snapshot
    pub fn new(db: Database, settings: Settings<S>) -> Result<Self> {
        let transactions = db.list_transactions()?;
        let planned_payments = db.list_planned_payments()?;

        info!(
            "Loaded {} transactions and {} planned payments",
            transactions.len(),
            planned_payments.len()
        );

        let mut vm = Self {
            db,
            settings,
            assistant: BudgetAssistant::new(),
            predictor: SpendingPredictor::new(),
            reference_date: None,
            transactions,
            planned_payments,
            search_text: String::new(),
            search_scope: SearchScope::default(),
            filtered_transactions: Vec::new(),
            balance: 0.0,
            category_expenses: Vec::new(),
            analysis: MonthlyAnalysis {
                total_spending: 0.0,
                biggest_category: String::new(),
                savings_potential: 0.0,
                insights: Vec::new(),
                suggested_budgets: Vec::new(),
            },
            current_saving_tip: None,
        };
        vm.recompute_derived_state();

        Ok(vm)
    }

    /// Treat `date` as today instead of the local clock
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self.recompute_derived_state();
        self
    }

    /// Language for generated messages and tips
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.assistant = self.assistant.with_locale(locale);
        self.recompute_derived_state();
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn current_month(&self) -> u32 {
        self.today().month()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn assistant(&self) -> &BudgetAssistant {
        &self.assistant
    }

    // ========== Mutations ==========

    pub fn add_transaction(&mut self, tx: NewTransaction) -> bool {
        match self.db.insert_transaction(&tx) {
            Ok(id) => {
                debug!("Added transaction {} ({})", id, tx.title);
                self.reload();
                true
            }
            Err(e) => {
                warn!("Failed to save transaction '{}': {}", tx.title, e);
                false
            }
        }
    }

    /// Replace the stored transaction with the same id
    pub fn update_transaction(&mut self, tx: &Transaction) -> bool {
        let result = self.db.update_transaction(tx);
        self.finish_write("update transaction", tx.id, result)
    }

    pub fn delete_transaction(&mut self, id: i64) -> bool {
        let result = self.db.delete_transaction(id);
        self.finish_write("delete transaction", id, result)
    }

    pub fn add_planned_payment(&mut self, payment: NewPlannedPayment) -> bool {
        match self.db.insert_planned_payment(&payment) {
            Ok(id) => {
                debug!("Added planned payment {} ({})", id, payment.title);
                self.reload();
                true
            }
            Err(e) => {
                warn!("Failed to save planned payment '{}': {}", payment.title, e);
                false
            }
        }
    }

    pub fn update_planned_payment(&mut self, payment: &PlannedPayment) -> bool {
        let result = self.db.update_planned_payment(payment);
        self.finish_write("update planned payment", payment.id, result)
    }

    pub fn delete_planned_payment(&mut self, id: i64) -> bool {
        let result = self.db.delete_planned_payment(id);
        self.finish_write("delete planned payment", id, result)
    }

    /// Flip the paid flag of a planned payment
    pub fn toggle_payment_paid(&mut self, id: i64) -> bool {
        let Some(paid) = self.planned_payment(id).map(|p| p.is_paid) else {
            debug!("Skipping toggle: planned payment {} not found", id);
            return false;
        };

        let result = self.db.set_planned_payment_paid(id, !paid);
        self.finish_write("toggle planned payment", id, result)
    }

    fn finish_write(&mut self, action: &str, id: i64, result: Result<bool>) -> bool {
        match result {
            Ok(true) => {
                debug!("Applied {} {}", action, id);
                self.reload();
                true
            }
            Ok(false) => {
                debug!("Skipping {}: id {} not found", action, id);
                false
            }
            Err(e) => {
                warn!("Failed to {} {}: {}", action, id, e);
                false
            }
        }
    }

    /// Re-fetch both lists and recompute
    ///
    /// If either fetch fails the previous snapshot is kept.
    pub fn reload(&mut self) {
        let fetched = self
            .db
            .list_transactions()
            .and_then(|txs| Ok((txs, self.db.list_planned_payments()?)));

        match fetched {
            Ok((transactions, planned_payments)) => {
                self.transactions = transactions;
                self.planned_payments = planned_payments;
                self.recompute_derived_state();
            }
            Err(e) => warn!("Failed to reload data, keeping previous snapshot: {}", e),
        }
    }

    /// Recompute balance, filtered view, category breakdown, insights,
    /// suggested budgets and the saving tip, in that order
    pub fn recompute_derived_state(&mut self) {
        let today = self.today();

        self.balance = aggregate::balance(&self.transactions);
        self.filtered_transactions =
            aggregate::filter_transactions(&self.transactions, &self.search_text, self.search_scope);
        self.category_expenses = aggregate::category_breakdown(&self.transactions);
        self.analysis =
            self.assistant
                .analyze(&self.transactions, &self.planned_payments, today.month());
        self.current_saving_tip = Some(self.assistant.general_tip(today.ordinal0()).to_string());

        debug!(
            "Recomputed snapshot: {} transactions, {} payments, {} categories, balance {:.2}",
            self.transactions.len(),
            self.planned_payments.len(),
            self.category_expenses.len(),
            self.balance
        );
    }

    // ========== Search ==========

    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.refilter();
    }

    pub fn set_search_scope(&mut self, scope: SearchScope) {
        self.search_scope = scope;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered_transactions =
            aggregate::filter_transactions(&self.transactions, &self.search_text, self.search_scope);
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    // ========== Preferences ==========

    pub fn dark_mode(&self) -> bool {
        self.settings.dark_mode()
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> bool {
        match self.settings.set_dark_mode(enabled) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save theme preference: {}", e);
                false
            }
        }
    }

    pub fn profile(&self) -> UserProfile {
        self.settings.profile()
    }

    pub fn update_profile(
        &mut self,
        name: &str,
        email: Option<&str>,
        profile_image: Option<&[u8]>,
    ) -> bool {
        match self.settings.update_profile(name, email, profile_image) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save profile: {}", e);
                false
            }
        }
    }

    pub fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    // ========== Snapshot ==========

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn planned_payments(&self) -> &[PlannedPayment] {
        &self.planned_payments
    }

    pub fn planned_payment(&self, id: i64) -> Option<&PlannedPayment> {
        self.planned_payments.iter().find(|p| p.id == id)
    }

    pub fn filtered_transactions(&self) -> &[Transaction] {
        &self.filtered_transactions
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn category_expenses(&self) -> &[CategoryExpense] {
        &self.category_expenses
    }

    pub fn insights(&self) -> &[BudgetInsight] {
        &self.analysis.insights
    }

    pub fn suggested_budgets(&self) -> &[CategoryBudget] {
        &self.analysis.suggested_budgets
    }

    pub fn analysis(&self) -> &MonthlyAnalysis {
        &self.analysis
    }

    pub fn current_saving_tip(&self) -> Option<&str> {
        self.current_saving_tip.as_deref()
    }

    pub fn saving_tips(&self) -> Vec<String> {
        self.assistant.saving_tips(&self.analysis.insights)
    }

    // ========== Derived reads ==========

    pub fn total_income(&self) -> f64 {
        aggregate::total_by_type(&self.transactions, TransactionType::Income)
    }

    pub fn total_expense(&self) -> f64 {
        aggregate::total_by_type(&self.transactions, TransactionType::Expense)
    }

    pub fn highest_expense(&self) -> Option<&Transaction> {
        aggregate::highest_expense(&self.transactions)
    }

    pub fn average_expense(&self) -> f64 {
        aggregate::average_expense(&self.transactions)
    }

    pub fn monthly_summary(&self, month: u32) -> MonthSummary {
        aggregate::monthly_summary(&self.transactions, month)
    }

    pub fn monthly_category_breakdown(&self, month: u32) -> Vec<CategoryExpense> {
        aggregate::monthly_category_breakdown(&self.transactions, month)
    }

    pub fn payments_in_month(&self, month: u32) -> Vec<PlannedPayment> {
        aggregate::payments_in_month(&self.planned_payments, month)
    }

    pub fn payment_month_summary(&self, month: u32) -> PaymentMonthSummary {
        aggregate::payment_month_summary(&self.planned_payments, month)
    }

    pub fn upcoming_payments(&self, within_days: i64) -> Vec<PlannedPayment> {
        aggregate::upcoming_payments(&self.planned_payments, self.today(), within_days)
    }

    pub fn overdue_payments(&self) -> Vec<PlannedPayment> {
        aggregate::overdue_payments(&self.planned_payments, self.today())
    }

    pub fn predict(&self, category: &str) -> Prediction {
        self.predictor
            .predict(category, &self.transactions, self.today())
    }
}
