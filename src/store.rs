use slotmap::SlotMap;
use tracing::debug;

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::{PathError, PolypathError, Result};
use crate::geometry::Path;
use crate::input::{InputFile, LoadOptions};
use crate::math::Point3;
use crate::operations::{MergePart, MergePaths};

slotmap::new_key_type! {
    /// Unique identifier for a stored path.
    pub struct PathId;
}

/// Arena owning every path read from an input file.
///
/// Paths are addressed by [`PathId`]; iteration follows insertion order
/// as long as nothing has been removed.
#[derive(Debug, Default)]
pub struct PathStore {
    paths: SlotMap<PathId, Path>,
}

impl PathStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a path and returns its ID.
    pub fn add_path(&mut self, path: Path) -> PathId {
        self.paths.insert(path)
    }

    /// Removes a path, returning it if it was present.
    pub fn remove_path(&mut self, id: PathId) -> Option<Path> {
        self.paths.remove(id)
    }

    /// Returns a reference to the path, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] if the ID is stale.
    pub fn path(&self, id: PathId) -> Result<&Path> {
        self.paths
            .get(id)
            .ok_or_else(|| PathError::NotFound(format!("{id:?}")).into())
    }

    /// Returns a mutable reference to the path, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] if the ID is stale.
    pub fn path_mut(&mut self, id: PathId) -> Result<&mut Path> {
        self.paths
            .get_mut(id)
            .ok_or_else(|| PathError::NotFound(format!("{id:?}")).into())
    }

    /// ID of the first path called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] if no path has that name.
    pub fn find_by_name(&self, name: &str) -> Result<PathId> {
        self.paths
            .iter()
            .find(|(_, path)| path.name() == Some(name))
            .map(|(id, _)| id)
            .ok_or_else(|| PathError::NotFound(name.to_owned()).into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathId, &Path)> {
        self.paths.iter()
    }

    /// Loads every `Path … EndPath` block of `file`.
    ///
    /// Blocks that fail to load are skipped after their problems are
    /// recorded; a name used by an earlier block is reported as well.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`] if any block had problems, and an
    /// input error for a malformed block structure.
    pub fn load_all(
        &mut self,
        file: &InputFile,
        options: &LoadOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<PathId>> {
        let mark = diagnostics.error_count();
        let mut ids = Vec::new();

        for block in file.find_blocks("Path", "EndPath")? {
            let path = match Path::load(file, block, options, diagnostics) {
                Ok(path) => path,
                Err(PolypathError::Path(PathError::Invalid { .. })) => continue,
                Err(err) => return Err(err),
            };

            if let Some(name) = path.name() {
                if let Some(earlier) = ids
                    .iter()
                    .filter_map(|&id| self.paths.get(id))
                    .find(|p: &&Path| p.name() == Some(name))
                {
                    diagnostics.error(
                        DiagnosticCode::DuplicatePathName,
                        Some(block.start),
                        format!(
                            "path name \"{name}\" at line {} duplicates the path at line {}",
                            block.start,
                            earlier.start_line().unwrap_or_default()
                        ),
                    );
                }
            }
            ids.push(self.add_path(path));
        }

        debug!(loaded = ids.len(), "loaded path blocks");
        diagnostics.ensure_no_errors_since(mark)?;
        Ok(ids)
    }

    /// Runs [`Path::check`] on every path, reporting all problems.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`] if any path failed.
    pub fn check_all(&self, diagnostics: &mut Diagnostics) -> Result<()> {
        let mark = diagnostics.error_count();
        for path in self.paths.values() {
            // failures are counted below
            let _ = path.check(diagnostics);
        }
        diagnostics.ensure_no_errors_since(mark)?;
        Ok(())
    }

    /// Runs [`Path::check_bounding_box`] on every path against the mesh
    /// extent.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`] if any vertex lies outside.
    pub fn check_bounding_boxes(
        &self,
        lower_left: &Point3,
        upper_right: &Point3,
        tolerance: f64,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let mark = diagnostics.error_count();
        for path in self.paths.values() {
            // failures are counted below
            let _ = path.check_bounding_box(lower_left, upper_right, tolerance, diagnostics);
        }
        diagnostics.ensure_no_errors_since(mark)?;
        Ok(())
    }

    /// Merges stored open paths into one closed boundary and stores it.
    ///
    /// Returns `None` when fewer than two parts are given.
    ///
    /// # Errors
    ///
    /// See [`MergePaths::execute`].
    pub fn merge(
        &mut self,
        parts: &[MergePart],
        boundary_type: &str,
        boundary_name: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<PathId>> {
        let merged = MergePaths::new(parts.to_vec(), boundary_type, boundary_name)
            .execute(self, diagnostics)?;
        Ok(merged.map(|path| self.add_path(path)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Dim, PathPoint};

    const TWO_PATHS: &str = "\
Path
   name=lower
   point=(0,0)
   point=(2,0)
   point=(2,1)
   closed=false
EndPath

Path
   name=upper
   point=(2,1)
   point=(0,1)
   point=(0,0)
   closed=false
EndPath
";

    fn loaded(text: &str) -> (PathStore, Vec<PathId>, Diagnostics) {
        let mut store = PathStore::new();
        let mut diags = Diagnostics::new();
        let ids = store
            .load_all(&InputFile::from_text(text), &LoadOptions::default(), &mut diags)
            .unwrap();
        (store, ids, diags)
    }

    #[test]
    fn loads_blocks_in_order() {
        let (store, ids, diags) = loaded(TWO_PATHS);
        assert!(diags.is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.path(ids[0]).unwrap().name(), Some("lower"));
        assert_eq!(store.find_by_name("upper").unwrap(), ids[1]);
        assert!(matches!(
            store.find_by_name("missing"),
            Err(PolypathError::Path(PathError::NotFound(_)))
        ));
        assert!(store.check_all(&mut Diagnostics::new()).is_ok());
    }

    #[test]
    fn duplicate_names_are_reported() {
        let text = TWO_PATHS.replace("name=upper", "name=lower");
        let mut store = PathStore::new();
        let mut diags = Diagnostics::new();
        let err = store
            .load_all(&InputFile::from_text(&text), &LoadOptions::default(), &mut diags)
            .unwrap_err();
        assert!(matches!(err, PolypathError::Path(PathError::Invalid { errors: 1 })));
        let d = diags.iter().next().unwrap();
        assert_eq!(d.code, DiagnosticCode::DuplicatePathName);
        assert_eq!(d.line, Some(9));
    }

    #[test]
    fn bad_block_is_skipped() {
        let text = TWO_PATHS.replace("point=(0,1)", "point=(0,1,1)");
        let mut store = PathStore::new();
        let mut diags = Diagnostics::new();
        assert!(store
            .load_all(&InputFile::from_text(&text), &LoadOptions::default(), &mut diags)
            .is_err());
        assert_eq!(store.len(), 1);
        assert!(diags.contains(DiagnosticCode::InvalidValue));
    }

    #[test]
    fn checks_cover_every_path() {
        let mut store = PathStore::new();
        store.add_path(Path::new(Dim::Two));
        let pair = vec![PathPoint::new_2d(5.0, 5.0), PathPoint::new_2d(6.0, 5.0)];
        store.add_path(Path::from_points(pair, false).unwrap());
        let mut diags = Diagnostics::new();
        assert!(store.check_all(&mut diags).is_err());
        // unnamed and unflagged empty path, plus the unnamed pair
        assert_eq!(diags.error_count(), 4);

        let mut diags = Diagnostics::new();
        let err = store
            .check_bounding_boxes(
                &Point3::new(0.0, 0.0, 0.0),
                &Point3::new(5.5, 5.5, 0.0),
                1e-9,
                &mut diags,
            )
            .unwrap_err();
        assert!(matches!(err, PolypathError::Path(PathError::Invalid { errors: 1 })));
    }

    #[test]
    fn merge_stores_closed_boundary() {
        let (mut store, ids, mut diags) = loaded(TWO_PATHS);
        let parts = [MergePart::new(ids[0], false), MergePart::new(ids[1], false)];
        let merged = store.merge(&parts, "port", "P1", &mut diags).unwrap().unwrap();
        let path = store.path(merged).unwrap();
        assert_eq!(path.name(), Some("P1"));
        assert!(path.is_closed());
        assert_eq!(path.len(), 4);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn stale_ids_are_not_found() {
        let mut store = PathStore::new();
        let id = store.add_path(Path::new(Dim::Two));
        assert!(store.remove_path(id).is_some());
        assert!(matches!(store.path(id), Err(PolypathError::Path(PathError::NotFound(_)))));
        assert!(store.path_mut(id).is_err());
    }
}
