//! Robot weapons
//!
//! Every weapon has a fixed damage band and its own area of effect. The
//! flamethrower band doubles as flame-trap damage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Piercing line to the arena edge
    Railgun,
    /// 3-wide cone, four cells deep
    Flamethrower,
    /// One adjacent cell
    Hammer,
    /// 3x3 block around the target cell, limited ammunition
    Grenade,
}

impl WeaponKind {
    /// Inclusive raw damage range
    pub fn damage_range(&self) -> (i32, i32) {
        match self {
            WeaponKind::Railgun => (10, 20),
            WeaponKind::Hammer => (50, 60),
            WeaponKind::Grenade => (10, 40),
            WeaponKind::Flamethrower => (30, 50),
        }
    }

    /// Does firing consume grenades?
    pub fn uses_ordnance(&self) -> bool {
        matches!(self, WeaponKind::Grenade)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Railgun => "railgun",
            WeaponKind::Flamethrower => "flamethrower",
            WeaponKind::Hammer => "hammer",
            WeaponKind::Grenade => "grenade",
        }
    }
}

impl std::fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
