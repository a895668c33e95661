use serde::Serialize;

mod table;

/// Permission bits of a bot invite. Always 64 bits wide: the catalog's
/// highest flag sits at bit 46.
pub type Bitmask = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub id: &'static str,
    pub name: &'static str,
    pub bit: Bitmask,
    /// Selected when the owning category is bulk-activated.
    pub auto: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub selected: bool,
    pub flags: Vec<Flag>,
}

impl Category {
    /// Set the category toggle. Turning it on selects every auto-implied
    /// flag; turning it off leaves the flags as they are.
    pub fn toggle(&mut self, active: bool) {
        self.selected = active;
        if !active {
            return;
        }

        self.flags
            .iter_mut()
            .filter(|flag| flag.auto)
            .for_each(|flag| flag.selected = true);
    }

    /// Clear the category toggle only. Called whenever one of its flags is
    /// unchecked so the toggle stops claiming "everything".
    pub fn disable_active(&mut self) {
        self.selected = false;
    }

    pub fn bitmask(&self) -> Bitmask {
        self.flags
            .iter()
            .filter(|flag| flag.selected)
            .fold(0, |bm, flag| bm | flag.bit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog with nothing selected.
    pub fn new() -> Self {
        let categories = table::CATEGORIES
            .iter()
            .map(|&(name, defs)| Category {
                name,
                selected: false,
                flags: defs
                    .iter()
                    .map(|def| Flag {
                        id: def.id,
                        name: def.name,
                        bit: def.bit,
                        auto: def.auto,
                        selected: false,
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Build a catalog from the raw `v` parameter. Anything that does not
    /// parse leaves every flag unselected.
    pub fn from_param(raw: Option<&str>) -> Self {
        let mut catalog = Self::new();
        catalog.decode(raw);
        catalog
    }

    /// Reconcile the selection with an incoming raw value. Returns the parsed
    /// bitmask, or `None` when the input was absent or not numeric, in which
    /// case the catalog is left untouched.
    pub fn decode(&mut self, raw: Option<&str>) -> Option<Bitmask> {
        let bitmask = parse_bitmask(raw?)?;
        self.select_bits(bitmask);
        Some(bitmask)
    }

    /// Set every flag from its bit in `bitmask`, each independently.
    pub fn select_bits(&mut self, bitmask: Bitmask) {
        self.flags_mut()
            .for_each(|flag| flag.selected = bitmask & flag.bit != 0);
    }

    pub fn bitmask(&self) -> Bitmask {
        self.categories
            .iter()
            .fold(0, |bm, category| bm | category.bitmask())
    }

    /// Hex breakdown of the selection, e.g. `0x8 | 0x400`.
    pub fn explain(&self) -> String {
        let parts = self
            .selected()
            .map(|flag| format!("{:#x}", flag.bit))
            .collect::<Vec<_>>();

        if parts.is_empty() {
            "0x0".to_owned()
        } else {
            parts.join(" | ")
        }
    }

    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.categories.iter().flat_map(|c| c.flags.iter())
    }

    fn flags_mut(&mut self) -> impl Iterator<Item = &mut Flag> {
        self.categories.iter_mut().flat_map(|c| c.flags.iter_mut())
    }

    pub fn selected(&self) -> impl Iterator<Item = &Flag> {
        self.flags().filter(|flag| flag.selected)
    }

    pub fn flag(&self, id: &str) -> Option<&Flag> {
        self.flags().find(|flag| flag.id == id)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Select or clear a single flag. Clearing also drops the owning
    /// category's toggle.
    pub fn set(&mut self, id: &str, selected: bool) -> Result<(), CatalogError> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.flags.iter().any(|flag| flag.id == id))
            .ok_or_else(|| CatalogError::UnknownFlag(id.to_owned()))?;

        if let Some(flag) = category.flags.iter_mut().find(|flag| flag.id == id) {
            flag.selected = selected;
        }
        if !selected {
            category.disable_active();
        }
        Ok(())
    }

    /// Flip a single flag, returning its new state.
    pub fn flip(&mut self, id: &str) -> Result<bool, CatalogError> {
        let selected = !self
            .flag(id)
            .ok_or_else(|| CatalogError::UnknownFlag(id.to_owned()))?
            .selected;
        self.set(id, selected)?;
        Ok(selected)
    }

    /// Clear every flag and every category toggle.
    pub fn reset(&mut self) {
        for category in self.categories.iter_mut() {
            category.selected = false;
            category.flags.iter_mut().for_each(|f| f.selected = false);
        }
    }

    /// Every bit the catalog knows about.
    pub fn known_bits(&self) -> Bitmask {
        self.flags().fold(0, |bm, flag| bm | flag.bit)
    }

    /// Bits of `bitmask` that no flag covers. These are dropped by
    /// [`Catalog::select_bits`].
    pub fn unknown_bits(&self, bitmask: Bitmask) -> Bitmask {
        bitmask & !self.known_bits()
    }
}

/// Parse a decimal bitmask the way a browser's `parseInt` reads a query
/// value: leading whitespace and a `+` are skipped, and the leading run of
/// digits is used. Returns `None` when there are no digits, for negative
/// numbers, and for values that do not fit in 64 bits.
pub fn parse_bitmask(raw: &str) -> Option<Bitmask> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());

    raw[..end].parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownFlag(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownFlag(id) => write!(f, "Unknown permission flag: {}", id),
        }
    }
}

impl std::error::Error for CatalogError {}
