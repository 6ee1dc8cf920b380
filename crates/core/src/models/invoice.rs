use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Void,
}

/// A bill for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub booking_id: String,
    /// The user being billed.
    pub user_id: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Issued and not yet paid.
    pub fn is_outstanding(&self) -> bool {
        self.status == InvoiceStatus::Issued
    }

    /// Amount formatted as a decimal string, e.g. `"125.50"`.
    pub fn amount_display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub booking_id: String,
    pub user_id: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
}

impl Entity for Invoice {
    type Draft = NewInvoice;
    const COLLECTION: Collection = Collection::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.user_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewInvoice) -> Self {
        Self {
            id,
            booking_id: draft.booking_id,
            user_id: draft.user_id,
            amount_cents: draft.amount_cents,
            status: draft.status,
            due_on: draft.due_on,
            created_at: at,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount_cents: i64, status: InvoiceStatus) -> Invoice {
        Invoice::from_draft(
            "i1".to_string(),
            Utc::now(),
            NewInvoice {
                booking_id: "b1".to_string(),
                user_id: "u1".to_string(),
                amount_cents,
                status,
                due_on: None,
            },
        )
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(invoice(12550, InvoiceStatus::Draft).amount_display(), "125.50");
        assert_eq!(invoice(7, InvoiceStatus::Draft).amount_display(), "0.07");
        assert_eq!(invoice(-250, InvoiceStatus::Draft).amount_display(), "-2.50");
    }

    #[test]
    fn test_outstanding_only_when_issued() {
        assert!(invoice(100, InvoiceStatus::Issued).is_outstanding());
        assert!(!invoice(100, InvoiceStatus::Paid).is_outstanding());
        assert!(!invoice(100, InvoiceStatus::Draft).is_outstanding());
    }
}
