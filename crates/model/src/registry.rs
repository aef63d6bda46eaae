//! Ordered registry of the tiles found by the latest detection pass.
//!
//! Tiles keep the order they were handed over in; navigation follows that
//! order, not id order. The whole registry is swapped on every pass; names
//! bound to the previous set are discarded.

use callmap_common::error::{CallmapError, CallmapResult};

use crate::geometry::CornerRect;
use crate::tile::{CameraTile, TileId};

#[derive(Debug, Clone, Default)]
pub struct CameraRegistry {
    tiles: Vec<CameraTile>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every tile with `tiles`, keeping their order.
    ///
    /// Fails without touching the current contents if two tiles share an id.
    pub fn replace(&mut self, tiles: Vec<CameraTile>) -> CallmapResult<()> {
        for (index, tile) in tiles.iter().enumerate() {
            if tiles[..index].iter().any(|earlier| earlier.id == tile.id) {
                return Err(CallmapError::processing(format!(
                    "Duplicate tile id {} in detection result",
                    tile.id
                )));
            }
        }
        tracing::debug!(
            previous = self.tiles.len(),
            current = tiles.len(),
            "Camera registry replaced"
        );
        self.tiles = tiles;
        Ok(())
    }

    pub fn get(&self, id: TileId) -> CallmapResult<&CameraTile> {
        let index = self.position(id)?;
        Ok(&self.tiles[index])
    }

    /// Bind a participant name to a tile.
    pub fn assign_name(&mut self, id: TileId, name: impl Into<String>) -> CallmapResult<()> {
        let index = self.position(id)?;
        self.tiles[index].set_name(name);
        Ok(())
    }

    /// Bind names to tiles in registry order. Extra names are ignored and
    /// extra tiles keep their current name. Returns how many were bound.
    pub fn assign_names_in_order<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut bound = 0;
        for (tile, name) in self.tiles.iter_mut().zip(names) {
            tile.set_name(name);
            bound += 1;
        }
        bound
    }

    /// Forget every bound name (e.g. after switching presets).
    pub fn clear_names(&mut self) {
        for tile in &mut self.tiles {
            tile.set_name(String::new());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CameraTile> {
        self.tiles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(|tile| tile.id)
    }

    pub fn first(&self) -> Option<TileId> {
        self.tiles.first().map(|tile| tile.id)
    }

    /// The id after `id`, wrapping from the last tile to the first.
    pub fn next(&self, id: TileId) -> CallmapResult<TileId> {
        let index = self.position(id)?;
        Ok(self.tiles[(index + 1) % self.tiles.len()].id)
    }

    /// The id before `id`, wrapping from the first tile to the last.
    pub fn previous(&self, id: TileId) -> CallmapResult<TileId> {
        let index = self.position(id)?;
        let len = self.tiles.len();
        Ok(self.tiles[(index + len - 1) % len].id)
    }

    /// Tiles in order as `(id, name, corners)` for the crop relay.
    pub fn corner_rects(&self) -> Vec<(TileId, String, CornerRect)> {
        self.tiles
            .iter()
            .map(|tile| (tile.id, tile.name().to_string(), tile.rect.corners()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn position(&self, id: TileId) -> CallmapResult<usize> {
        self.tiles
            .iter()
            .position(|tile| tile.id == id)
            .ok_or(CallmapError::UnknownTileId { id: id.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ScreenRect;

    fn tiles(count: u32) -> Vec<CameraTile> {
        (0..count)
            .map(|i| {
                CameraTile::new(
                    TileId(i),
                    ScreenRect::new(i as i32 * 100, 0, 90, 60).unwrap(),
                    None,
                )
            })
            .collect()
    }

    fn registry(count: u32) -> CameraRegistry {
        let mut registry = CameraRegistry::new();
        registry.replace(tiles(count)).unwrap();
        registry
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut shuffled = tiles(3);
        shuffled.rotate_right(1);
        let mut registry = CameraRegistry::new();
        registry.replace(shuffled).unwrap();

        let ids: Vec<_> = registry.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![2, 0, 1]);
        assert_eq!(registry.first(), Some(TileId(2)));

        let corner_ids: Vec<_> = registry.corner_rects().iter().map(|c| c.0 .0).collect();
        assert_eq!(corner_ids, vec![2, 0, 1]);
    }

    #[test]
    fn navigation_follows_insertion_order() {
        let mut shuffled = tiles(3);
        shuffled.rotate_right(1);
        let mut registry = CameraRegistry::new();
        registry.replace(shuffled).unwrap();

        assert_eq!(registry.next(TileId(2)).unwrap(), TileId(0));
        assert_eq!(registry.next(TileId(1)).unwrap(), TileId(2));
        assert_eq!(registry.previous(TileId(2)).unwrap(), TileId(1));
        assert_eq!(registry.previous(TileId(0)).unwrap(), TileId(2));
    }

    #[test]
    fn names_bind_in_insertion_order() {
        let mut shuffled = tiles(2);
        shuffled.reverse();
        let mut registry = CameraRegistry::new();
        registry.replace(shuffled).unwrap();

        registry.assign_names_in_order(["Luna", "James"]);
        assert_eq!(registry.get(TileId(1)).unwrap().name(), "Luna");
        assert_eq!(registry.get(TileId(0)).unwrap().name(), "James");
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let registry = registry(3);
        assert_eq!(registry.next(TileId(0)).unwrap(), TileId(1));
        assert_eq!(registry.next(TileId(2)).unwrap(), TileId(0));
        assert_eq!(registry.previous(TileId(0)).unwrap(), TileId(2));
        assert_eq!(registry.previous(TileId(2)).unwrap(), TileId(1));
    }

    #[test]
    fn single_tile_navigates_to_itself() {
        let registry = registry(1);
        assert_eq!(registry.next(TileId(0)).unwrap(), TileId(0));
        assert_eq!(registry.previous(TileId(0)).unwrap(), TileId(0));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut registry = registry(2);
        assert!(matches!(
            registry.assign_name(TileId(7), "Luna"),
            Err(CallmapError::UnknownTileId { id: 7 })
        ));
        assert!(registry.next(TileId(7)).is_err());
        assert!(registry.get(TileId(7)).is_err());
    }

    #[test]
    fn assign_name_binds_tile() {
        let mut registry = registry(2);
        registry.assign_name(TileId(1), "James").unwrap();
        assert_eq!(registry.get(TileId(1)).unwrap().name(), "James");
        assert!(!registry.get(TileId(0)).unwrap().is_bound());
    }

    #[test]
    fn replace_discards_previous_names() {
        let mut registry = registry(2);
        registry.assign_name(TileId(0), "Luna").unwrap();
        registry.replace(tiles(3)).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.iter().all(|tile| tile.name().is_empty()));
    }

    #[test]
    fn duplicate_ids_leave_registry_untouched() {
        let mut registry = registry(2);
        registry.assign_name(TileId(0), "Luna").unwrap();

        let mut bad = tiles(2);
        bad[1].id = TileId(0);
        assert!(registry.replace(bad).is_err());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(TileId(0)).unwrap().name(), "Luna");
    }

    #[test]
    fn names_bind_in_order_and_clear() {
        let mut registry = registry(3);
        let bound = registry.assign_names_in_order(["Luna", "James"]);
        assert_eq!(bound, 2);
        assert_eq!(registry.get(TileId(1)).unwrap().name(), "James");
        assert_eq!(registry.get(TileId(2)).unwrap().name(), "");

        registry.clear_names();
        assert!(registry.iter().all(|tile| !tile.is_bound()));
    }

    #[test]
    fn corner_rects_expose_bottom_right() {
        let mut registry = registry(2);
        registry.assign_name(TileId(1), "James").unwrap();
        let corners = registry.corner_rects();
        assert_eq!(corners[1].1, "James");
        assert_eq!(corners[1].2.x, 100);
        assert_eq!(corners[1].2.x1, 190);
        assert_eq!(corners[1].2.y1, 60);
    }
}
