//! Booking answers collected from a guest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room types offered at the room-type step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Triple,
    King,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Triple,
        RoomType::King,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Triple => "Triple",
            RoomType::King => "King",
        }
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|r| r.label().to_string()).collect()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment types offered at the payment-type step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Money,
    #[serde(rename = "Credit card")]
    CreditCard,
}

impl PaymentType {
    pub const ALL: [PaymentType; 2] = [PaymentType::Money, PaymentType::CreditCard];

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Money => "Money",
            PaymentType::CreditCard => "Credit card",
        }
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|p| p.label().to_string()).collect()
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulated booking answers, one live profile per user
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub age: i32,
    pub room_type: Option<RoomType>,
    pub payment_type: Option<PaymentType>,
    /// Set once the review dialog has finished, whatever the guest answered
    pub form_completed: bool,
}
