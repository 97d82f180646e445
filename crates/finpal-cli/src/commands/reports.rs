//! Report command implementations

use anyhow::Result;
use finpal_core::insights::Trend;
use finpal_core::{PreferenceStore, ViewModel};

use super::{month_name, progress_bar, truncate};

pub fn cmd_balance<S: PreferenceStore>(vm: &ViewModel<S>) -> Result<()> {
    let locale = vm.assistant().locale();

    println!();
    println!("💰 Balance: {}", locale.format_amount(vm.balance()));
    println!("   ─────────────────────────────");
    println!(
        "   Income:   \x1b[32m{}\x1b[0m",
        locale.format_amount(vm.total_income())
    );
    println!(
        "   Expenses: \x1b[31m{}\x1b[0m",
        locale.format_amount(vm.total_expense())
    );

    match vm.highest_expense() {
        Some(tx) => println!(
            "   Highest expense: {} ({}, {})",
            locale.format_amount(tx.amount),
            truncate(&tx.title, 30),
            tx.date
        ),
        None => println!("   Highest expense: none yet"),
    }
    println!(
        "   Average expense: {}",
        locale.format_amount(vm.average_expense())
    );

    if let Some(tip) = vm.current_saving_tip() {
        println!();
        println!("💡 {}", tip);
    }

    Ok(())
}

pub fn cmd_breakdown<S: PreferenceStore>(vm: &ViewModel<S>, month: Option<u32>) -> Result<()> {
    let breakdown = match month {
        Some(m) => vm.monthly_category_breakdown(m),
        None => vm.category_expenses().to_vec(),
    };

    println!();
    match month {
        Some(m) => println!("📊 Expenses by Category ({})", month_name(m)),
        None => println!("📊 Expenses by Category"),
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    println!("   {:20} │ {:>10} │ {:>6} │", "Category", "Amount", "%");
    println!("   ─────────────────────┼────────────┼────────┼─────────────────────");

    for cat in &breakdown {
        println!(
            "   {:20} │ {:>10.2} │ {:>5.1}% │ {}",
            truncate(&cat.category, 20),
            cat.amount,
            cat.percentage,
            progress_bar(cat.percentage / 100.0, 20)
        );
    }

    Ok(())
}

pub fn cmd_summary<S: PreferenceStore>(vm: &ViewModel<S>, month: Option<u32>) -> Result<()> {
    let month = month.unwrap_or_else(|| vm.current_month());
    let summary = vm.monthly_summary(month);
    let locale = vm.assistant().locale();

    println!();
    println!("📅 {} Summary", month_name(month));
    println!("   ─────────────────────────────");
    println!("   Income:   {}", locale.format_amount(summary.income));
    println!("   Expenses: {}", locale.format_amount(summary.expense));

    let net = if summary.net < 0.0 {
        format!("\x1b[31m-{}\x1b[0m", locale.format_amount(summary.net.abs()))
    } else {
        format!("\x1b[32m{}\x1b[0m", locale.format_amount(summary.net))
    };
    println!("   Net:      {}", net);

    let payments = vm.payment_month_summary(month);
    if payments.total > 0.0 {
        println!();
        println!(
            "   Planned payments: {} ({} paid, {} remaining)",
            locale.format_amount(payments.total),
            locale.format_amount(payments.completed),
            locale.format_amount(payments.remaining)
        );
    }

    Ok(())
}

pub fn cmd_insights<S: PreferenceStore>(vm: &ViewModel<S>, json: bool) -> Result<()> {
    let assistant = vm.assistant();
    let locale = assistant.locale();
    let analysis = vm.analysis();
    let tips = vm.saving_tips();

    if json {
        let output = serde_json::json!({
            "month": vm.current_month(),
            "main_message": analysis.main_message(locale),
            "analysis": analysis,
            "saving_tips": tips,
            "general_tip": vm.current_saving_tip(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("🧠 Budget Assistant ({})", month_name(vm.current_month()));
    println!("   ─────────────────────────────────────────────────────────────");

    if analysis.insights.is_empty() {
        println!("   No expenses to analyze yet.");
        return Ok(());
    }

    println!("   {}", analysis.main_message(locale));
    println!();
    println!(
        "   Total spending:    {}",
        locale.format_amount(analysis.total_spending)
    );
    println!("   Biggest category:  {}", analysis.biggest_category);
    println!(
        "   Savings potential: {}",
        locale.format_amount(analysis.savings_potential)
    );

    println!();
    println!(
        "   {:3}{:18} │ {:10} │ {:>10} │ {:>10} │ {:>10}",
        "", "Category", "Trend", "This month", "Last month", "Suggested"
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────────┼────────────");

    for insight in &analysis.insights {
        let icon = match insight.trend {
            Trend::Increased => format!("\x1b[31m{}\x1b[0m", insight.trend.icon()),
            Trend::Decreased => format!("\x1b[32m{}\x1b[0m", insight.trend.icon()),
            Trend::Stable => insight.trend.icon().to_string(),
        };
        println!(
            "   {}  {:18} │ {:10} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            icon,
            truncate(&insight.category, 18),
            insight.trend.label(locale),
            insight.current_spending,
            insight.previous_spending,
            insight.suggestion
        );
    }

    println!();
    for insight in &analysis.insights {
        println!("   • {}", insight.message);
        println!("     {}", assistant.detailed_analysis(insight));
    }

    println!();
    println!("   Suggested budgets");
    for budget in &analysis.suggested_budgets {
        println!(
            "   {:18} {} {:>5.0}%  ({:.2} / {:.2})",
            truncate(&budget.category, 18),
            progress_bar(budget.progress, 20),
            budget.progress * 100.0,
            budget.current_amount,
            budget.suggested_amount
        );
    }

    if !tips.is_empty() {
        println!();
        println!("💡 Smart suggestions");
        for tip in &tips {
            println!("   • {}", tip);
        }
    }

    if let Some(tip) = vm.current_saving_tip() {
        println!();
        println!("💡 {}", tip);
    }

    Ok(())
}

pub fn cmd_predict<S: PreferenceStore>(vm: &ViewModel<S>, category: &str) -> Result<()> {
    let prediction = vm.predict(category);
    let locale = vm.assistant().locale();

    println!();
    println!("🔮 Spending Prediction: {}", category);
    println!("   ─────────────────────────────");

    if prediction.last_month_spending == 0.0 {
        println!("   No spending in '{}' over the last month.", category);
        return Ok(());
    }

    println!(
        "   Last month:      {}",
        locale.format_amount(prediction.last_month_spending)
    );
    println!(
        "   Predicted:       {}",
        locale.format_amount(prediction.predicted_amount)
    );
    println!(
        "   Suggested limit: {}",
        locale.format_amount(prediction.suggested_limit)
    );
    println!("   Confidence:      {:.0}%", prediction.confidence * 100.0);

    Ok(())
}
