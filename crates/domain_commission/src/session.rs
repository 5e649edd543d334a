//! Editing a deal's commission configuration
//!
//! An [`EditSession`] holds the configuration being edited next to a snapshot
//! of what was last persisted, recomputing the summary on demand.

use rust_decimal::Decimal;
use serde_json::Value;

use core_kernel::{coerce_decimal, coerce_flag};

use crate::engine::AllocationEngine;
use crate::error::CommissionError;
use crate::line::{default_lines, AppliesTo, CommissionLineConfig};
use crate::stored::StoredCommission;
use crate::summary::AllocationSummary;

/// A single field change on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Name(String),
    AppliesTo(AppliesTo),
    Percent(Decimal),
    Fixed(Decimal),
    SubtractOtherDeposit(bool),
    Comment(Option<String>),
}

impl LineEdit {
    /// Reads an edit from a wire field name and a raw value
    ///
    /// Returns `None` for fields that cannot be edited.
    pub fn from_field(field: &str, value: &Value) -> Option<Self> {
        let edit = match field {
            "name" => LineEdit::Name(value.as_str().unwrap_or_default().to_string()),
            "appliesTo" => LineEdit::AppliesTo(AppliesTo::from_value(value)),
            "percent" => LineEdit::Percent(coerce_decimal(value)),
            "fixed" => LineEdit::Fixed(coerce_decimal(value)),
            "substractOtherDepostit" => LineEdit::SubtractOtherDeposit(coerce_flag(value)),
            "comment" => LineEdit::Comment(value.as_str().map(str::to_string)),
            _ => return None,
        };
        Some(edit)
    }

    fn apply(self, line: &mut CommissionLineConfig) {
        match self {
            LineEdit::Name(name) => line.name = name,
            LineEdit::AppliesTo(applies_to) => line.applies_to = applies_to,
            LineEdit::Percent(percent) => line.percent = percent,
            LineEdit::Fixed(fixed) => line.fixed = fixed,
            LineEdit::SubtractOtherDeposit(flag) => line.subtract_other_deposit = flag,
            LineEdit::Comment(comment) => line.comment = comment,
        }
    }
}

/// The persisted part of a session's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub lines: Vec<CommissionLineConfig>,
    pub deposit_percent: Decimal,
}

/// An in-progress edit of one deal's commission configuration
#[derive(Debug, Clone)]
pub struct EditSession {
    engine: AllocationEngine,
    deal_value: Decimal,
    deposit_percent: Decimal,
    lines: Vec<CommissionLineConfig>,
    saved: ConfigSnapshot,
}

impl EditSession {
    /// Opens a session on a deal
    ///
    /// A deal without stored lines starts from [`default_lines`], which counts
    /// as an unsaved change.
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine used for summaries
    /// * `deal_value` - The deal's current value
    /// * `deposit_percent` - Deposit percentage used when none was stored
    /// * `stored` - The decoded stored configuration
    pub fn open(
        engine: AllocationEngine,
        deal_value: Decimal,
        deposit_percent: Decimal,
        stored: &StoredCommission,
    ) -> Self {
        let deposit_percent = stored.deposit_percent.unwrap_or(deposit_percent);
        let saved = ConfigSnapshot {
            lines: stored.commission_config.clone(),
            deposit_percent,
        };
        let lines = if stored.is_empty() {
            default_lines()
        } else {
            stored.commission_config.clone()
        };

        tracing::debug!(
            deal_value = %deal_value,
            lines = lines.len(),
            format = ?stored.format,
            "Opened commission edit session"
        );

        Self {
            engine,
            deal_value,
            deposit_percent,
            lines,
            saved,
        }
    }

    pub fn lines(&self) -> &[CommissionLineConfig] {
        &self.lines
    }

    pub fn deal_value(&self) -> Decimal {
        self.deal_value
    }

    pub fn deposit_percent(&self) -> Decimal {
        self.deposit_percent
    }

    /// Replaces the deal value, e.g. after the CRM record changed
    pub fn set_deal_value(&mut self, deal_value: Decimal) {
        self.deal_value = deal_value;
    }

    pub fn set_deposit_percent(&mut self, deposit_percent: Decimal) {
        self.deposit_percent = deposit_percent;
    }

    /// Appends a blank line and returns its index
    pub fn add_line(&mut self) -> usize {
        self.lines.push(CommissionLineConfig::blank(self.lines.len() + 1));
        self.lines.len() - 1
    }

    /// Removes the line at `index`
    ///
    /// # Errors
    ///
    /// Returns [`CommissionError::LastLine`] when only one line is left, or
    /// [`CommissionError::LineIndexOutOfRange`] for a bad index.
    pub fn remove_line(&mut self, index: usize) -> Result<CommissionLineConfig, CommissionError> {
        self.check_index(index)?;
        if self.lines.len() <= 1 {
            return Err(CommissionError::LastLine);
        }
        Ok(self.lines.remove(index))
    }

    /// Applies one field change to the line at `index`
    pub fn update_line(&mut self, index: usize, edit: LineEdit) -> Result<&CommissionLineConfig, CommissionError> {
        self.check_index(index)?;

        let mut line = self.lines[index].clone();
        edit.apply(&mut line);
        self.lines[index] = line.normalized(index + 1);

        Ok(&self.lines[index])
    }

    fn check_index(&self, index: usize) -> Result<(), CommissionError> {
        if index >= self.lines.len() {
            return Err(CommissionError::LineIndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    /// Computes the summary of the current state
    pub fn summary(&self) -> AllocationSummary {
        self.engine.summarize(self.deal_value, self.deposit_percent, &self.lines)
    }

    /// The current lines and deposit percentage
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            lines: self.lines.clone(),
            deposit_percent: self.deposit_percent,
        }
    }

    /// True when the current state differs from the last persisted one
    pub fn is_dirty(&self) -> bool {
        self.saved.lines != self.lines || self.saved.deposit_percent != self.deposit_percent
    }

    /// True when the lines add up to the deal value
    pub fn can_save(&self) -> bool {
        self.summary().matches_deal_value
    }

    /// Builds the record to persist
    ///
    /// # Errors
    ///
    /// Returns [`CommissionError::Unbalanced`] when the lines do not add up
    /// to the deal value.
    pub fn save_payload(&self) -> Result<StoredCommission, CommissionError> {
        let summary = self.summary();
        if !summary.matches_deal_value {
            return Err(CommissionError::Unbalanced {
                difference: summary.difference_to_deal_value,
            });
        }

        Ok(StoredCommission::new(
            summary.commission_config,
            self.deposit_percent,
            self.deal_value,
        ))
    }

    /// Records the current state as persisted
    pub fn mark_saved(&mut self) {
        self.saved = self.snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn session() -> EditSession {
        EditSession::open(AllocationEngine::default(), dec!(1000), dec!(20), &StoredCommission::empty())
    }

    #[test]
    fn test_open_without_config_uses_defaults_and_is_dirty() {
        let session = session();

        assert_eq!(session.lines(), default_lines().as_slice());
        assert!(session.is_dirty());
        assert!(session.can_save());
    }

    #[test]
    fn test_stored_deposit_percent_wins() {
        let stored = StoredCommission::new(default_lines(), dec!(35), dec!(1000));
        let session = EditSession::open(AllocationEngine::default(), dec!(1000), dec!(20), &stored);

        assert_eq!(session.deposit_percent(), dec!(35));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_add_line_names_by_position() {
        let mut session = session();
        let index = session.add_line();

        assert_eq!(index, 2);
        assert_eq!(session.lines()[2].name, "New line 3");
        assert!(session.lines()[2].id.as_str().starts_with("line-"));
        assert!(session.can_save());
    }

    #[test]
    fn test_remove_line_keeps_one() {
        let mut session = session();

        session.remove_line(1).unwrap();
        assert!(matches!(session.remove_line(0), Err(CommissionError::LastLine)));
        assert!(matches!(
            session.remove_line(4),
            Err(CommissionError::LineIndexOutOfRange { index: 4, len: 1 })
        ));
    }

    #[test]
    fn test_update_line_renormalizes() {
        let mut session = session();

        let line = session.update_line(0, LineEdit::Name("   ".into())).unwrap();
        assert_eq!(line.name, "Line 1");

        let edit = LineEdit::from_field("percent", &json!("abc")).unwrap();
        session.update_line(1, edit).unwrap();
        assert_eq!(session.lines()[1].percent, dec!(0));
        assert!(LineEdit::from_field("id", &json!("x")).is_none());

        let edit = LineEdit::from_field("name", &json!(42)).unwrap();
        assert_eq!(session.update_line(1, edit).unwrap().name, "Line 2");
    }

    #[test]
    fn test_save_requires_balance() {
        let mut session = session();
        session.update_line(0, LineEdit::Percent(dec!(60))).unwrap();

        assert!(matches!(
            session.save_payload(),
            Err(CommissionError::Unbalanced { difference }) if difference == dec!(50)
        ));

        session.update_line(1, LineEdit::Percent(dec!(40))).unwrap();
        let payload = session.save_payload().unwrap();
        assert_eq!(payload.deposit_percent, Some(dec!(20)));

        session.mark_saved();
        assert!(!session.is_dirty());
        session.set_deposit_percent(dec!(25));
        assert!(session.is_dirty());
    }
}
