//! Pre-built Test Fixtures
//!
//! Provides reference deals and line sets whose outcomes are known by hand.
//! These fixtures are designed to be consistent and predictable for unit tests.

use core_kernel::DealId;
use domain_commission::{AppliesTo, CommissionLineConfig, StoredCommission, SubDeal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

/// Fixture for deal-level amounts
pub struct DealFixtures;

impl DealFixtures {
    /// The reference deal value used by most scenarios
    pub fn deal_value() -> Decimal {
        dec!(1000)
    }

    /// A 20% deposit
    pub fn deposit_percent() -> Decimal {
        dec!(20)
    }

    /// A 50% deposit, used by the cascade scenarios
    pub fn half_deposit() -> Decimal {
        dec!(50)
    }
}

/// Fixture for typed commission lines
pub struct LineFixtures;

impl LineFixtures {
    /// Two total-scoped partners splitting 65/35
    pub fn balanced_partners() -> Vec<CommissionLineConfig> {
        vec![
            CommissionLineConfig::new("partner-a", "Partner A", AppliesTo::Total, dec!(65), Decimal::ZERO),
            CommissionLineConfig::new("partner-b", "Partner B", AppliesTo::Total, dec!(35), Decimal::ZERO),
        ]
    }

    /// Same as [`LineFixtures::balanced_partners`] with the second share cut to 30%
    pub fn short_partners() -> Vec<CommissionLineConfig> {
        let mut lines = Self::balanced_partners();
        lines[1].percent = dec!(30);
        lines
    }

    /// A plain deposit fee followed by a net deposit fee, both 10%
    pub fn cascading_deposit_fees() -> Vec<CommissionLineConfig> {
        vec![
            CommissionLineConfig::new("agency", "Agency", AppliesTo::Deposit, dec!(10), Decimal::ZERO),
            CommissionLineConfig::new("notary", "Notary", AppliesTo::Deposit, dec!(10), Decimal::ZERO)
                .with_subtract_other_deposit(true),
        ]
    }

    /// Deposit fees plus a total-scoped line taking whatever is left
    pub fn cascade_with_remainder() -> Vec<CommissionLineConfig> {
        let mut lines = Self::cascading_deposit_fees();
        lines.push(CommissionLineConfig::new(
            "seller",
            "Seller",
            AppliesTo::Total,
            dec!(100),
            Decimal::ZERO,
        ));
        lines
    }
}

/// Fixture for untyped line configurations as they arrive from storage
pub struct RawConfigFixtures;

impl RawConfigFixtures {
    /// The balanced partner split as raw JSON
    pub fn balanced_partners() -> Value {
        json!([
            {"appliesTo": "total", "percent": 65, "fixed": 0},
            {"appliesTo": "total", "percent": 35, "fixed": 0}
        ])
    }

    /// The cascade scenario as raw JSON
    pub fn cascading_deposit_fees() -> Value {
        json!([
            {"appliesTo": "deposit", "percent": 10, "fixed": 0, "substractOtherDepostit": false},
            {"appliesTo": "deposit", "percent": 10, "fixed": 0, "substractOtherDepostit": true}
        ])
    }

    /// A mix of garbage and half-filled entries
    pub fn malformed() -> Value {
        json!([null, {"percent": "abc"}, {"name": "  ", "fixed": "12.50"}])
    }

    /// The balanced partners in the combined stored shape, serialized
    pub fn combined_stored_text() -> String {
        json!({
            "commissionConfig": Self::balanced_partners(),
            "depositPercent": 20,
            "dealValue": 1000
        })
        .to_string()
    }
}

/// Fixture for sub-deals
pub struct SubDealFixtures;

impl SubDealFixtures {
    /// A sub-deal sharing a recipient name with [`LineFixtures::balanced_partners`]
    pub fn with_partner_a() -> SubDeal {
        SubDeal::from_raw(
            DealId::from("sub-1"),
            Some("Garage"),
            &json!(200),
            &json!(10),
            &json!([
                {"name": "Partner A", "percent": 50},
                {"name": "Broker", "percent": 50}
            ]),
        )
    }

    /// A sub-deal with nothing configured
    pub fn unconfigured() -> SubDeal {
        SubDeal::from_raw(DealId::from("sub-2"), None, &json!("300"), &json!(0), &json!(null))
    }

    /// A stored record holding the balanced partners
    pub fn stored_partners() -> StoredCommission {
        StoredCommission::new(LineFixtures::balanced_partners(), DealFixtures::deposit_percent(), DealFixtures::deal_value())
    }
}
