//! Restaurant Domain Models
//!
//! This module contains the restaurant record and the consumption methods a
//! customer can choose on the landing page.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant, addressed externally only by its slug
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Internal identifier, used to scope product listings
    pub id: Uuid,

    /// Unique, immutable, URL-safe key (e.g. `doceria-abc`)
    pub slug: String,

    /// Display name
    pub name: String,

    /// Short text shown under the name on the menu page
    #[serde(default)]
    pub description: String,

    /// Logo shown on the landing page
    pub avatar_image_url: String,

    /// Banner shown on top of the menu page
    #[serde(default)]
    pub cover_image_url: String,
}

// =============================================================================
// Consumption Method
// =============================================================================

/// How an order is fulfilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumptionMethod {
    /// Customer picks the order up
    Withdraw,
    /// Order is delivered to the customer
    Delivery,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown consumption method: {0:?}")]
pub struct InvalidConsumptionMethod(pub String);

impl ConsumptionMethod {
    /// Every method, in the order the selector shows them
    pub const ALL: [Self; 2] = [Self::Withdraw, Self::Delivery];

    /// Wire name used in query strings and JSON
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Withdraw => "WITHDRAW",
            Self::Delivery => "DELIVERY",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Withdraw => "Para retirar",
            Self::Delivery => "Para entregar",
        }
    }

    pub const fn image_path(self) -> &'static str {
        match self {
            Self::Withdraw => "/assets/withdraw.svg",
            Self::Delivery => "/assets/delivery.svg",
        }
    }
}

impl fmt::Display for ConsumptionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsumptionMethod {
    type Err = InvalidConsumptionMethod;

    /// Parses the exact wire name; no case folding.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| InvalidConsumptionMethod(value.to_owned()))
    }
}

/// One clickable choice of the consumption method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumptionMethodOption<'a> {
    /// Restaurant the option is scoped to
    pub slug: &'a str,
    pub option: ConsumptionMethod,
    pub button_text: &'a str,
    pub image_alt: &'a str,
    pub image_url: &'a str,
}

impl ConsumptionMethodOption<'_> {
    /// Navigation target: the menu page for this restaurant and method
    pub fn href(&self) -> String {
        format!("/{}/menu?consumptionMethod={}", self.slug, self.option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("WITHDRAW", Ok(ConsumptionMethod::Withdraw))]
    #[case("DELIVERY", Ok(ConsumptionMethod::Delivery))]
    #[case("delivery", Err(InvalidConsumptionMethod("delivery".into())))]
    #[case("DINE_IN", Err(InvalidConsumptionMethod("DINE_IN".into())))]
    #[case("", Err(InvalidConsumptionMethod(String::new())))]
    fn test_parse_consumption_method(
        #[case] raw: &str,
        #[case] expected: Result<ConsumptionMethod, InvalidConsumptionMethod>,
    ) {
        assert_eq!(raw.parse::<ConsumptionMethod>(), expected);
    }

    #[test]
    fn test_consumption_method_serde_uses_wire_names() {
        assert_eq!(json!(ConsumptionMethod::Withdraw), json!("WITHDRAW"));
        let parsed: ConsumptionMethod = serde_json::from_value(json!("DELIVERY")).unwrap();
        assert_eq!(parsed, ConsumptionMethod::Delivery);
    }

    #[test]
    fn test_option_href_is_scoped_by_slug_and_option() {
        let option = ConsumptionMethodOption {
            slug: "doceria-abc",
            option: ConsumptionMethod::Delivery,
            button_text: "Para entregar",
            image_alt: "Para entregar",
            image_url: "/assets/delivery.svg",
        };
        assert_eq!(option.href(), "/doceria-abc/menu?consumptionMethod=DELIVERY");
    }

    #[test]
    fn test_restaurant_json_is_camel_case() {
        let restaurant: Restaurant = serde_json::from_value(json!({
            "id": "6f1b2c3d-0000-4000-8000-000000000001",
            "slug": "doceria-abc",
            "name": "Doceria ABC",
            "avatarImageUrl": "/assets/withdraw.svg"
        }))
        .unwrap();

        assert_eq!(restaurant.description, "");
        assert_eq!(restaurant.cover_image_url, "");
        assert_eq!(json!(restaurant)["avatarImageUrl"], "/assets/withdraw.svg");
    }
}
