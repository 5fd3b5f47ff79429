//! Demo promo codes.
//!
//! Codes are checked locally and only produce a message; they never change
//! cart totals.

use serde::Serialize;

use crate::notification::NotificationKind;

/// A recognized promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PromoCode {
    /// `WELCOME10`
    Welcome10,
    /// `SAVE20`
    Save20,
    /// `FREESHIP`
    FreeShip,
}

/// What a promo code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoBenefit {
    PercentOff(u8),
    FreeShipping,
}

impl PromoCode {
    pub const ALL: [Self; 3] = [Self::Welcome10, Self::Save20, Self::FreeShip];

    /// Look up a code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn lookup(input: &str) -> Option<Self> {
        let normalized = input.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome10 => "WELCOME10",
            Self::Save20 => "SAVE20",
            Self::FreeShip => "FREESHIP",
        }
    }

    #[must_use]
    pub const fn benefit(self) -> PromoBenefit {
        match self {
            Self::Welcome10 => PromoBenefit::PercentOff(10),
            Self::Save20 => PromoBenefit::PercentOff(20),
            Self::FreeShip => PromoBenefit::FreeShipping,
        }
    }

    /// Confirmation shown when the code is accepted.
    #[must_use]
    pub fn message(self) -> String {
        match self.benefit() {
            PromoBenefit::PercentOff(percent) => format!("{percent}% discount applied!"),
            PromoBenefit::FreeShipping => "Free shipping applied!".to_string(),
        }
    }
}

/// Result of applying a code, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoOutcome {
    pub code: Option<PromoCode>,
    pub message: String,
    pub kind: NotificationKind,
}

impl PromoOutcome {
    /// Apply `input` and describe the result.
    #[must_use]
    pub fn apply(input: &str) -> Self {
        PromoCode::lookup(input).map_or_else(
            || Self {
                code: None,
                message: "Invalid promo code".to_string(),
                kind: NotificationKind::Error,
            },
            |code| Self {
                code: Some(code),
                message: code.message(),
                kind: NotificationKind::Success,
            },
        )
    }
}
