use std::collections::BTreeSet;

use fontdb::{Database, Family, Query};
use tracing::{debug, info};

use crate::{FontFace, FontParseError};

/// Looks up installed fonts by family name.
pub struct FontDiscovery {
    db: Database,
}

impl Default for FontDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl FontDiscovery {
    /// Scans the system font directories.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "Loaded system fonts");

        Self { db }
    }

    /// All family names, sorted and without duplicates.
    pub fn list_families(&self) -> Vec<String> {
        self.collect_families(|_| true)
    }

    /// Families with at least one face flagged as monospaced.
    pub fn monospace_families(&self) -> Vec<String> {
        self.collect_families(|face| face.monospaced)
    }

    fn collect_families(&self, filter: impl Fn(&fontdb::FaceInfo) -> bool) -> Vec<String> {
        self.db
            .faces()
            .filter(|face| filter(face))
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Resolves a user-supplied name to an installed family, preferring an
    /// exact (case-insensitive) match over the first family containing it.
    pub fn find_family(&self, name: &str) -> Option<String> {
        let families = self.list_families();
        let needle = name.to_lowercase();

        families
            .iter()
            .find(|family| family.to_lowercase() == needle)
            .or_else(|| {
                families
                    .iter()
                    .find(|family| family.to_lowercase().contains(&needle))
            })
            .cloned()
    }

    /// Loads the regular face of `family`.
    ///
    /// # Errors
    /// Returns [`FontParseError::FamilyNotFound`] if no installed family
    /// matches, or [`FontParseError::Malformed`] if its data cannot be parsed.
    pub fn load_face(&self, family: &str) -> Result<FontFace, FontParseError> {
        let not_found = || FontParseError::FamilyNotFound { family: family.to_string() };

        let resolved = self.find_family(family).ok_or_else(not_found)?;
        let id = self
            .db
            .query(&Query {
                families: &[Family::Name(&resolved)],
                ..Default::default()
            })
            .ok_or_else(not_found)?;

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index as usize))
            .ok_or_else(not_found)?;

        info!(family = %resolved, index, "Loading system font");
        FontFace::from_bytes(data, index)
    }
}
