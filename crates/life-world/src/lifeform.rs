//! Catalog of known lifeforms that can be stamped onto a world.

use life_core::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pattern family, by how a shape behaves across generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    StillLife,
    Oscillator,
    Spaceship,
}

/// Every shape the catalog knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeformKind {
    Block,
    BeeHive,
    Loaf,
    Boat,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    PentaDecathalon,
    Glider,
    LightWeightSpaceship,
    MiddleWeightSpaceship,
    HeavyWeightSpaceship,
}

impl LifeformKind {
    pub const ALL: [LifeformKind; 13] = [
        LifeformKind::Block,
        LifeformKind::BeeHive,
        LifeformKind::Loaf,
        LifeformKind::Boat,
        LifeformKind::Blinker,
        LifeformKind::Toad,
        LifeformKind::Beacon,
        LifeformKind::Pulsar,
        LifeformKind::PentaDecathalon,
        LifeformKind::Glider,
        LifeformKind::LightWeightSpaceship,
        LifeformKind::MiddleWeightSpaceship,
        LifeformKind::HeavyWeightSpaceship,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LifeformKind::Block => "Block",
            LifeformKind::BeeHive => "BeeHive",
            LifeformKind::Loaf => "Loaf",
            LifeformKind::Boat => "Boat",
            LifeformKind::Blinker => "Blinker",
            LifeformKind::Toad => "Toad",
            LifeformKind::Beacon => "Beacon",
            LifeformKind::Pulsar => "Pulsar",
            LifeformKind::PentaDecathalon => "PentaDecathalon",
            LifeformKind::Glider => "Glider",
            LifeformKind::LightWeightSpaceship => "LightWeightSpaceship",
            LifeformKind::MiddleWeightSpaceship => "MiddleWeightSpaceship",
            LifeformKind::HeavyWeightSpaceship => "HeavyWeightSpaceship",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            LifeformKind::Block | LifeformKind::BeeHive | LifeformKind::Loaf | LifeformKind::Boat => {
                Family::StillLife
            }
            LifeformKind::Blinker
            | LifeformKind::Toad
            | LifeformKind::Beacon
            | LifeformKind::Pulsar
            | LifeformKind::PentaDecathalon => Family::Oscillator,
            LifeformKind::Glider
            | LifeformKind::LightWeightSpaceship
            | LifeformKind::MiddleWeightSpaceship
            | LifeformKind::HeavyWeightSpaceship => Family::Spaceship,
        }
    }

    /// Build the immutable shape for this kind.
    pub fn lifeform(&self) -> Lifeform {
        Lifeform::from_rows(*self, self.tiles())
    }

    fn tiles(&self) -> &'static [&'static [u8]] {
        match self {
            // Still lifes
            LifeformKind::Block => &[
                &[1, 1],
                &[1, 1],
            ],
            LifeformKind::BeeHive => &[
                &[0, 1, 1, 0],
                &[1, 0, 0, 1],
                &[0, 1, 1, 0],
            ],
            LifeformKind::Loaf => &[
                &[0, 1, 1, 0],
                &[1, 0, 0, 1],
                &[0, 1, 0, 1],
                &[0, 0, 1, 0],
            ],
            LifeformKind::Boat => &[
                &[1, 1, 0],
                &[1, 0, 1],
                &[0, 1, 0],
            ],

            // Oscillators
            LifeformKind::Blinker => &[
                &[1, 1, 1],
            ],
            LifeformKind::Toad => &[
                &[0, 1, 1, 1],
                &[1, 1, 1, 0],
            ],
            LifeformKind::Beacon => &[
                &[1, 1, 0, 0],
                &[1, 0, 0, 0],
                &[0, 0, 0, 1],
                &[0, 0, 1, 1],
            ],
            LifeformKind::Pulsar => &[
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
            ],
            LifeformKind::PentaDecathalon => &[
                &[0, 1, 0],
                &[0, 1, 0],
                &[1, 0, 1],
                &[0, 1, 0],
                &[0, 1, 0],
                &[0, 1, 0],
                &[0, 1, 0],
                &[1, 0, 1],
                &[0, 1, 0],
                &[0, 1, 0],
            ],

            // Spaceships
            LifeformKind::Glider => &[
                &[0, 0, 1, 0],
                &[0, 0, 0, 1],
                &[0, 1, 1, 1],
            ],
            LifeformKind::LightWeightSpaceship => &[
                &[1, 0, 0, 1, 0],
                &[0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 1],
                &[0, 1, 1, 1, 1],
            ],
            LifeformKind::MiddleWeightSpaceship => &[
                &[0, 0, 1, 0, 0, 0],
                &[1, 0, 0, 0, 1, 0],
                &[0, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1],
                &[0, 1, 1, 1, 1, 1],
            ],
            LifeformKind::HeavyWeightSpaceship => &[
                &[0, 0, 1, 1, 0, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0],
                &[0, 0, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 0, 1],
                &[0, 1, 1, 1, 1, 1, 1],
            ],
        }
    }
}

impl fmt::Display for LifeformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifeformKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LifeformKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownLifeform(s.to_string()))
    }
}

/// An immutable rectangular occupancy pattern. Carries no position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifeform {
    kind: LifeformKind,
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Lifeform {
    fn from_rows(kind: LifeformKind, rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        debug_assert!(rows.iter().all(|row| row.len() == width));

        Self {
            kind,
            width: width as i32,
            height: height as i32,
            cells: rows.iter().flat_map(|row| row.iter().map(|&v| v == 1)).collect(),
        }
    }

    pub fn kind(&self) -> LifeformKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Occupancy at an offset within the shape. Offsets outside the shape are empty.
    pub fn is_occupied(&self, ox: i32, oy: i32) -> bool {
        if ox < 0 || ox >= self.width || oy < 0 || oy >= self.height {
            return false;
        }
        self.cells[(oy * self.width + ox) as usize]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Registry of every known lifeform, queryable by name and sampled at random
#[derive(Debug, Clone)]
pub struct LifeformCatalog {
    kinds: Vec<LifeformKind>,
}

impl Default for LifeformCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeformCatalog {
    pub fn new() -> Self {
        Self {
            kinds: LifeformKind::ALL.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kinds(&self) -> &[LifeformKind] {
        &self.kinds
    }

    pub fn by_name(&self, name: &str) -> Result<Lifeform> {
        let kind: LifeformKind = name.parse()?;
        Ok(kind.lifeform())
    }

    /// All shapes belonging to one family, in registry order
    pub fn family(&self, family: Family) -> Vec<Lifeform> {
        self.kinds
            .iter()
            .filter(|kind| kind.family() == family)
            .map(|kind| kind.lifeform())
            .collect()
    }

    /// Draw `count` distinct shapes without replacement, in random order.
    ///
    /// Requests larger than the registry are capped at the registry size.
    pub fn random<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Lifeform> {
        let mut shuffled = self.kinds.clone();
        shuffled.shuffle(rng);
        shuffled
            .into_iter()
            .take(count)
            .map(|kind| kind.lifeform())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_shape_dimensions() {
        let blinker = LifeformKind::Blinker.lifeform();
        assert_eq!((blinker.width(), blinker.height()), (3, 1));

        let pulsar = LifeformKind::Pulsar.lifeform();
        assert_eq!((pulsar.width(), pulsar.height()), (13, 13));
        assert_eq!(pulsar.population(), 48);

        let penta = LifeformKind::PentaDecathalon.lifeform();
        assert_eq!((penta.width(), penta.height()), (3, 10));
    }

    #[test]
    fn test_occupancy_matches_rows() {
        let glider = LifeformKind::Glider.lifeform();
        assert!(!glider.is_occupied(0, 0));
        assert!(glider.is_occupied(2, 0));
        assert!(glider.is_occupied(3, 1));
        assert!(glider.is_occupied(1, 2));
        assert!(glider.is_occupied(3, 2));
        assert_eq!(glider.population(), 5);
        assert!(!glider.is_occupied(4, 0));
    }

    #[test]
    fn test_families() {
        let catalog = LifeformCatalog::new();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.family(Family::StillLife).len(), 4);
        assert_eq!(catalog.family(Family::Oscillator).len(), 5);
        assert_eq!(catalog.family(Family::Spaceship).len(), 4);
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = LifeformCatalog::new();
        assert_eq!(catalog.by_name("Toad").unwrap().kind(), LifeformKind::Toad);
        assert_eq!(
            catalog.by_name("lightweightspaceship").unwrap().kind(),
            LifeformKind::LightWeightSpaceship
        );
        assert!(matches!(
            catalog.by_name("Gosper"),
            Err(Error::UnknownLifeform(name)) if name == "Gosper"
        ));
    }

    #[test]
    fn test_random_is_distinct() {
        let catalog = LifeformCatalog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let picked = catalog.random(5, &mut rng);
        assert_eq!(picked.len(), 5);
        let kinds: HashSet<_> = picked.iter().map(|l| l.kind()).collect();
        assert_eq!(kinds.len(), 5);
    }

    #[test]
    fn test_random_caps_at_registry_size() {
        let catalog = LifeformCatalog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let picked = catalog.random(100, &mut rng);
        assert_eq!(picked.len(), catalog.len());
        let kinds: HashSet<_> = picked.iter().map(|l| l.kind()).collect();
        assert_eq!(kinds.len(), catalog.len());

        assert!(catalog.random(0, &mut rng).is_empty());
    }

    #[test]
    fn test_random_is_reproducible() {
        let catalog = LifeformCatalog::new();
        let a = catalog.random(4, &mut ChaCha8Rng::seed_from_u64(9));
        let b = catalog.random(4, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&LifeformKind::Glider).unwrap();
        let kind: LifeformKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, LifeformKind::Glider);
    }
}
