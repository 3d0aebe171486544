//! Backend record DTOs and write payloads.
//!
//! DESIGN
//! ======
//! Records are owned by the backend; the client renders them and never
//! validates or computes over them. Decimal amounts stay strings exactly as
//! the backend formats them. Unknown fields are ignored and optional fields
//! default, so additive backend changes do not break decoding.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Id = i64;

// =============================================================================
// CHORES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub id: Id,
    pub name: String,
    /// Cron expression (e.g. `"0 8 * * *"`).
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub assigned_to: Option<Id>,
}

/// One scheduled occurrence of a chore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoreEntry {
    pub id: Id,
    pub chore: Id,
    pub assigned_to: Id,
    pub due_date: String,
    /// `awaiting`, `completed`, `approved`, `rejected` or `achieved`.
    pub status: String,
}

/// How a recurring chore stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndMode {
    #[default]
    Never,
    OnDate,
    AfterOccurrences,
}

impl std::str::FromStr for EndMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "on_date" => Ok(Self::OnDate),
            "after_occurrences" => Ok(Self::AfterOccurrences),
            other => Err(format!("unknown end mode '{other}' (expected never, on_date or after_occurrences)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewChore {
    pub name: String,
    pub points: i64,
    pub assigned_to: Option<Id>,
    pub schedule: String,
    pub start_date: String,
    pub end_mode: EndMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_after: Option<u32>,
}

/// Result of converting chore points into money.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsExchange {
    pub transaction: Id,
}

/// Body returned by approve/reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStatus {
    pub status: String,
}

// =============================================================================
// LEDGER
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Expense,
    Liability,
    Equity,
    Revenue,
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(Self::Asset),
            "expense" => Ok(Self::Expense),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            other => Err(format!("unknown account type '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub owner: Option<Id>,
    #[serde(default)]
    pub balance: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    /// `None` means the account belongs to the whole family.
    pub owner: Option<Id>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub description: String,
    pub amount: String,
    pub debit_account: Id,
    pub credit_account: Id,
    #[serde(default)]
    pub category: Option<Id>,
    #[serde(default)]
    pub journal: Option<Id>,
}

// =============================================================================
// ASSETS & EXCHANGE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub current_price: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetPrice {
    pub id: Id,
    pub asset: Id,
    pub value: String,
    pub timestamp: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::str::FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(format!("unknown order side '{other}' (expected 'buy' or 'sell')")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOrder {
    pub id: Id,
    pub asset: Id,
    pub side: OrderSide,
    pub quantity: String,
    pub price: String,
    #[serde(default)]
    pub remaining: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewOrder {
    pub asset: Id,
    pub side: OrderSide,
    pub quantity: String,
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeTrade {
    pub id: Id,
    pub asset: Id,
    pub price: String,
    pub quantity: String,
    pub timestamp: String,
}

// =============================================================================
// FAMILIES
// =============================================================================

/// Member role. Only parents get the admin views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
    Guest,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Guest => "guest",
        }
    }

    #[must_use]
    pub fn can_administer(self) -> bool {
        matches!(self, Self::Parent)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            "guest" => Ok(Self::Guest),
            other => Err(format!("unknown role '{other}' (expected parent, child or guest)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub settings_json: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: Id,
    pub user: Id,
    #[serde(default)]
    pub family: Option<Id>,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Id,
    pub email: String,
    pub family: Id,
    pub role: Role,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub created: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewInvitation {
    pub email: String,
    pub family: Id,
    pub role: Role,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedRead {
    pub marked: u64,
}
