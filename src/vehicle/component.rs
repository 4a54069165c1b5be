use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Component: one catalog entry a student can bolt onto a stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Capsule,
    FuelTank,
    Engine,
    Booster,
    Fins,
    Fairing,
    Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub mass_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrust_kn: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_impulse_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_time_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propellant_mass_kg: Option<f64>,
}

impl Component {
    /// Start a component with only a mass; performance fields are added with
    /// the chained setters below.
    pub fn new(id: impl Into<String>, kind: ComponentKind, mass_kg: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            mass_kg,
            thrust_kn: None,
            specific_impulse_s: None,
            burn_time_seconds: None,
            propellant_mass_kg: None,
        }
    }

    pub fn thrust(mut self, kn: f64) -> Self { self.thrust_kn = Some(kn); self }
    pub fn isp(mut self, s: f64) -> Self { self.specific_impulse_s = Some(s); self }
    pub fn burn_time(mut self, s: f64) -> Self { self.burn_time_seconds = Some(s); self }
    pub fn propellant(mut self, kg: f64) -> Self { self.propellant_mass_kg = Some(kg); self }

    /// Numeric fields paired with their names, for validation.
    pub(crate) fn quantities(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("mass_kg", Some(self.mass_kg)),
            ("thrust_kn", self.thrust_kn),
            ("specific_impulse_s", self.specific_impulse_s),
            ("burn_time_seconds", self.burn_time_seconds),
            ("propellant_mass_kg", self.propellant_mass_kg),
        ]
    }
}

// ---------------------------------------------------------------------------
// Catalog: id -> component lookup, owned by whoever generates the parts list
// ---------------------------------------------------------------------------

/// Read-only component lookup. Ordered so that iteration and serialization
/// are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Component>", into = "Vec<Component>")]
pub struct ComponentCatalog {
    components: BTreeMap<String, Component>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a component, keyed by its id.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.components.insert(component.id.clone(), component)
    }

    pub fn with(mut self, component: Component) -> Self {
        self.insert(component);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }
}

impl From<Vec<Component>> for ComponentCatalog {
    fn from(list: Vec<Component>) -> Self {
        list.into_iter().collect()
    }
}

impl From<ComponentCatalog> for Vec<Component> {
    fn from(catalog: ComponentCatalog) -> Self {
        catalog.components.into_values().collect()
    }
}

impl FromIterator<Component> for ComponentCatalog {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut catalog = ComponentCatalog::new();
        for c in iter {
            catalog.insert(c);
        }
        catalog
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
