//! Fixed tower sites.
//!
//! Tower positions matter only to the propagation model.  Capacity belongs
//! to the controller's run configuration, not to the layout.

use cs_core::{Point, TowerId};

use crate::{SignalError, SignalResult};

/// Where a tower stands, before it is assigned an id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerSite {
    pub name:     String,
    pub position: Point,
}

impl TowerSite {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self { name: name.into(), position }
    }
}

/// A tower with its assigned id.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    pub id:       TowerId,
    pub name:     String,
    pub position: Point,
}

/// The set of towers for a run.  Ids are assigned in insertion order.
#[derive(Clone, Debug)]
pub struct TowerLayout {
    towers: Vec<Tower>,
}

impl TowerLayout {
    /// Build a layout from sites; the first site becomes `TowerId(0)`.
    pub fn new(sites: impl IntoIterator<Item = TowerSite>) -> SignalResult<Self> {
        let towers: Vec<Tower> = sites
            .into_iter()
            .enumerate()
            .map(|(i, site)| Tower {
                id:       TowerId(i as u32),
                name:     site.name,
                position: site.position,
            })
            .collect();
        if towers.is_empty() {
            return Err(SignalError::NoTowers);
        }
        Ok(Self { towers })
    }

    /// Three small cells in a 1 km square: two along the south edge and one
    /// to the north.
    pub fn three_cell() -> Self {
        let towers = [
            ("Cell A", Point::new(200.0, 200.0)),
            ("Cell B", Point::new(800.0, 200.0)),
            ("Cell C", Point::new(500.0, 800.0)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, position))| Tower {
            id:   TowerId(i as u32),
            name: name.to_owned(),
            position,
        })
        .collect();
        Self { towers }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.towers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.towers.is_empty()
    }

    #[inline]
    pub fn get(&self, id: TowerId) -> Option<&Tower> {
        self.towers.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tower> {
        self.towers.iter()
    }
}
