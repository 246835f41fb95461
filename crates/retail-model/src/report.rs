use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Rule that caused a row to be dropped during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NullValue,
    InvalidDate,
    InvalidEmail,
    InvalidPhone,
    InvalidCardNumber,
    InvalidExpiry,
    InvalidStoreType,
    InvalidStaffCount,
    InvalidWeight,
    InvalidPrice,
    InvalidAvailability,
    InvalidQuantity,
    InvalidTimePeriod,
    OrphanReference,
    Duplicate,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::NullValue => "null_value",
            RejectReason::InvalidDate => "invalid_date",
            RejectReason::InvalidEmail => "invalid_email",
            RejectReason::InvalidPhone => "invalid_phone",
            RejectReason::InvalidCardNumber => "invalid_card_number",
            RejectReason::InvalidExpiry => "invalid_expiry",
            RejectReason::InvalidStoreType => "invalid_store_type",
            RejectReason::InvalidStaffCount => "invalid_staff_count",
            RejectReason::InvalidWeight => "invalid_weight",
            RejectReason::InvalidPrice => "invalid_price",
            RejectReason::InvalidAvailability => "invalid_availability",
            RejectReason::InvalidQuantity => "invalid_quantity",
            RejectReason::InvalidTimePeriod => "invalid_time_period",
            RejectReason::OrphanReference => "orphan_reference",
            RejectReason::Duplicate => "duplicate",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RejectReason::NullValue => "required value is empty or a null sentinel",
            RejectReason::InvalidDate => "value is not a calendar date",
            RejectReason::InvalidEmail => "malformed email address",
            RejectReason::InvalidPhone => "phone number does not match the country pattern",
            RejectReason::InvalidCardNumber => "card number has a bad length or non-digits",
            RejectReason::InvalidExpiry => "expiry is not MM/YY",
            RejectReason::InvalidStoreType => "unknown store type",
            RejectReason::InvalidStaffCount => "staff count is not a non-negative integer",
            RejectReason::InvalidWeight => "weight is unparseable or not positive",
            RejectReason::InvalidPrice => "price is not a non-negative amount",
            RejectReason::InvalidAvailability => "unknown availability flag",
            RejectReason::InvalidQuantity => "quantity is not a positive integer",
            RejectReason::InvalidTimePeriod => "unknown time period",
            RejectReason::OrphanReference => "foreign key not present in the cleaned dimension",
            RejectReason::Duplicate => "natural key already seen",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Maximum number of offending values retained per tally.
pub const MAX_SAMPLES: usize = 3;

/// Rows dropped for one rule, optionally scoped to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectTally {
    pub reason: RejectReason,
    pub column: Option<String>,
    pub count: u64,
    pub samples: Vec<String>,
}

/// Outcome of cleaning one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    pub entity: Entity,
    pub input_rows: usize,
    pub output_rows: usize,
    pub rejections: Vec<RejectTally>,
}

impl CleaningReport {
    pub fn new(entity: Entity, input_rows: usize) -> Self {
        Self {
            entity,
            input_rows,
            output_rows: 0,
            rejections: Vec::new(),
        }
    }

    pub fn record(&mut self, reason: RejectReason, column: Option<&str>, sample: &str) {
        let existing = self
            .rejections
            .iter()
            .position(|tally| tally.reason == reason && tally.column.as_deref() == column);
        let index = match existing {
            Some(index) => index,
            None => {
                self.rejections.push(RejectTally {
                    reason,
                    column: column.map(str::to_string),
                    count: 0,
                    samples: Vec::new(),
                });
                self.rejections.len() - 1
            }
        };
        let tally = &mut self.rejections[index];
        tally.count += 1;
        let sample = sample.trim();
        if tally.samples.len() < MAX_SAMPLES
            && !sample.is_empty()
            && !tally.samples.iter().any(|seen| seen == sample)
        {
            tally.samples.push(sample.to_string());
        }
    }

    pub fn dropped(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }

    pub fn count_for(&self, reason: RejectReason) -> u64 {
        self.rejections
            .iter()
            .filter(|tally| tally.reason == reason)
            .map(|tally| tally.count)
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}
