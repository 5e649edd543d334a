//! Report rendering

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use core_kernel::{Currency, CurrencyFormat, Money};
use domain_commission::{AllocationSummary, MergedGroup, SubDealTotals};

/// Sub-deal section of a report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedReport {
    pub groups: Vec<MergedGroup>,
    pub sub_deal_totals: SubDealTotals,
}

/// Everything printed for one request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub summary: AllocationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<MergedReport>,
}

/// Renders a report as JSON
pub fn to_json(report: &Report, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Renders a report as a plain-text table
pub fn to_text(report: &Report, currency: Currency, style: CurrencyFormat) -> String {
    TextReport {
        report,
        currency,
        style,
    }
    .to_string()
}

struct TextReport<'a> {
    report: &'a Report,
    currency: Currency,
    style: CurrencyFormat,
}

impl TextReport<'_> {
    fn money(&self, amount: Decimal) -> String {
        Money::new(amount, self.currency).format(self.style)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.report.summary;

        writeln!(f, "Model           {}", summary.model)?;
        writeln!(f, "Deal value      {}", self.money(summary.deal_value))?;
        writeln!(
            f,
            "Deposit ({}%)  {}",
            summary.deposit_percent.normalize(),
            self.money(summary.deposit_amount)
        )?;
        writeln!(f, "Remaining       {}", self.money(summary.remaining_amount))?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<24} {:<10} {:>8} {:>14} {:>14} {:>14} {:>14}",
            "Party", "Applies to", "Percent", "Fixed", "Base", "Percent amt", "Total"
        )?;
        for line in &summary.lines {
            writeln!(
                f,
                "{:<24} {:<10} {:>8} {:>14} {:>14} {:>14} {:>14}",
                line.name(),
                line.config.applies_to.as_str(),
                format!("{}%", line.config.percent.normalize()),
                self.money(line.config.fixed),
                self.money(line.base_amount),
                self.money(line.percent_amount),
                self.money(line.total),
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Total disbursed {}", self.money(summary.total_disbursed))?;
        writeln!(f, "Difference      {}", self.money(summary.difference_to_deal_value))?;
        writeln!(
            f,
            "Status          {}",
            if summary.matches_deal_value { "balanced" } else { "unbalanced" }
        )?;

        if let Some(merged) = &self.report.merged {
            writeln!(f)?;
            writeln!(f, "By recipient")?;
            for group in &merged.groups {
                writeln!(f, "  {:<22} {:>14}", group.name, self.money(group.total()))?;
            }
            writeln!(f, "Sub-deal deposits   {}", self.money(merged.sub_deal_totals.deposit_total))?;
            writeln!(f, "Sub-deal remaining  {}", self.money(merged.sub_deal_totals.remaining_total))?;
        }

        Ok(())
    }
}
