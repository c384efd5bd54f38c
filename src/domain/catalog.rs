//! Static series catalog: which FRED series feeds each burger component and how
//! much of it one burger consumes.
//!
//! Physical ingredients are priced per pound (or per unit for the bun). The two
//! operational components are derived from auxiliary series:
//!
//! - Labor: average hourly wage × minutes of labor per burger / 60
//! - Cooking Energy: electricity price per kWh × grill kW × cooking minutes / 60

use serde::{Deserialize, Serialize};

/// Minutes of labor attributed to one burger.
pub const LABOR_MINUTES_PER_BURGER: f64 = 6.0;

/// Grill power draw in kW.
pub const GRILL_POWER_KW: f64 = 2.4;

/// Minutes the grill runs per burger.
pub const COOKING_MINUTES_PER_BURGER: f64 = 4.0;

/// Hours of labor per burger (the multiplier applied to the hourly wage series).
pub const LABOR_HOURS_PER_BURGER: f64 = LABOR_MINUTES_PER_BURGER / 60.0;

/// kWh consumed per burger (the multiplier applied to the electricity series).
pub const COOKING_KWH_PER_BURGER: f64 = GRILL_POWER_KW * (COOKING_MINUTES_PER_BURGER / 60.0);

/// Average hourly earnings, leisure and hospitality.
pub const SERIES_LABOR_WAGE: &str = "CES7000000003";

/// Average price of electricity per kWh.
pub const SERIES_ELECTRICITY: &str = "APU000072610";

/// Unit a serving weight is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingUnit {
    Pound,
    Ounce,
    Tablespoon,
    Teaspoon,
    Unit,
}

/// A tracked cost component of one cheeseburger.
///
/// Serializes as its whitespace-free key (`GroundBeef`, `CookingEnergy`, ...),
/// which is also the field name used on historical points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Component {
    GroundBeef,
    AmericanCheese,
    Lettuce,
    Tomato,
    HamburgerBun,
    Labor,
    CookingEnergy,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::GroundBeef,
        Component::AmericanCheese,
        Component::Lettuce,
        Component::Tomato,
        Component::HamburgerBun,
        Component::Labor,
        Component::CookingEnergy,
    ];

    pub const fn display_name(self) -> &'static str {
        match self {
            Component::GroundBeef => "Ground Beef",
            Component::AmericanCheese => "American Cheese",
            Component::Lettuce => "Lettuce",
            Component::Tomato => "Tomato",
            Component::HamburgerBun => "Hamburger Bun",
            Component::Labor => "Labor",
            Component::CookingEnergy => "Cooking Energy",
        }
    }

    /// Display name with whitespace stripped.
    pub const fn key(self) -> &'static str {
        match self {
            Component::GroundBeef => "GroundBeef",
            Component::AmericanCheese => "AmericanCheese",
            Component::Lettuce => "Lettuce",
            Component::Tomato => "Tomato",
            Component::HamburgerBun => "HamburgerBun",
            Component::Labor => "Labor",
            Component::CookingEnergy => "CookingEnergy",
        }
    }

    pub const fn series_id(self) -> &'static str {
        match self {
            Component::GroundBeef => "APU0100710211",
            Component::AmericanCheese => "APU0000710211",
            Component::Lettuce => "APU0000FL2101",
            Component::Tomato => "APU0000712311",
            Component::HamburgerBun => "APU0000702111",
            Component::Labor => SERIES_LABOR_WAGE,
            Component::CookingEnergy => SERIES_ELECTRICITY,
        }
    }

    /// Fraction of the series' reporting unit consumed by one burger.
    pub const fn serving_weight(self) -> f64 {
        match self {
            // quarter-pound patty
            Component::GroundBeef => 0.25,
            // one 1 oz slice
            Component::AmericanCheese => 0.0625,
            Component::Lettuce => 0.1,
            Component::Tomato => 0.1,
            Component::HamburgerBun => 1.0,
            Component::Labor => LABOR_HOURS_PER_BURGER,
            Component::CookingEnergy => COOKING_KWH_PER_BURGER,
        }
    }

    pub const fn serving_unit(self) -> ServingUnit {
        match self {
            Component::GroundBeef
            | Component::AmericanCheese
            | Component::Lettuce
            | Component::Tomato => ServingUnit::Pound,
            Component::HamburgerBun | Component::Labor | Component::CookingEnergy => {
                ServingUnit::Unit
            }
        }
    }

    /// Labor and Cooking Energy are computed from wage/electricity series rather
    /// than priced as ingredients.
    pub const fn is_derived(self) -> bool {
        matches!(self, Component::Labor | Component::CookingEnergy)
    }

    pub const fn spec(self) -> ComponentSpec {
        ComponentSpec {
            component: self,
            series_id: self.series_id(),
            serving_weight: self.serving_weight(),
            serving_unit: self.serving_unit(),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How to fetch one component and convert its raw price into a per-burger cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSpec {
    pub component: Component,
    pub series_id: &'static str,
    pub serving_weight: f64,
    pub serving_unit: ServingUnit,
}

impl ComponentSpec {
    pub fn serving_cost(&self, price_per_unit: f64) -> f64 {
        price_per_unit * self.serving_weight
    }
}

/// Ordered set of components the aggregator prices.
///
/// Each component should appear at most once; historical points are keyed by
/// component.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<ComponentSpec>,
}

impl Catalog {
    pub fn new(entries: Vec<ComponentSpec>) -> Self {
        Self { entries }
    }

    /// The full cheeseburger: five ingredients, then Labor and Cooking Energy.
    pub fn standard() -> Self {
        Self::new(Component::ALL.iter().map(|c| c.spec()).collect())
    }

    pub fn entries(&self) -> &[ComponentSpec] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
