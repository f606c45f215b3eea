use std::fmt;

/// Price reported for plan names that match no known plan.
///
/// Callers must treat this sentinel as "invalid plan".
pub const INVALID_PLAN_PRICE: f64 = -1.0;

/// Pricing tier for a regular membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    Basic,
    Standard,
    Deluxe,
}

impl Plan {
    /// Parses a plan name, ignoring case. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Some(Plan::Basic),
            "standard" => Some(Plan::Standard),
            "deluxe" => Some(Plan::Deluxe),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Standard => "Standard",
            Plan::Deluxe => "Deluxe",
        }
    }

    /// Monthly price for the plan.
    pub fn price(&self) -> f64 {
        match self {
            Plan::Basic => 6_500.0,
            Plan::Standard => 12_500.0,
            Plan::Deluxe => 18_500.0,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the price for a plan name, ignoring case.
///
/// Returns [`INVALID_PLAN_PRICE`] for unknown names.
pub fn plan_price(name: &str) -> f64 {
    Plan::parse(name).map_or(INVALID_PLAN_PRICE, |plan| plan.price())
}
