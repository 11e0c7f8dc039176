//! Tile maps
//!
//! A tile map is a fixed grid of cells, each empty or holding the name of a
//! tile definition. A definition locates a tile in the tileset image and
//! says whether it blocks movement. Cells store names, so redefining a name
//! changes every cell that uses it.
//!
//! Grid coordinates are `(column, row)` and signed: reads outside the grid
//! are simply empty, writes outside it are rejected.

use crate::error::{EngineError, EngineResult};
use crate::physics::Aabb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

slotmap::new_key_type! {
    /// Identifier of a tile map owned by a scene
    pub struct TileMapId;
}

/// Where a tile lives in the tileset and whether it is solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Tileset column of the tile image
    pub cell_x: u32,
    /// Tileset row of the tile image
    pub cell_y: u32,
    /// Whether the tile blocks collidable entities
    pub is_solid: bool,
}

/// Grid of named tiles drawn from one tileset image
#[derive(Debug, Clone)]
pub struct TileMap {
    /// Horizontal pixel offset of the map in the scene
    pub x: f32,
    /// Vertical pixel offset of the map in the scene
    pub y: f32,
    image_file: String,
    map_width: u32,
    map_height: u32,
    tile_width: u32,
    tile_height: u32,
    /// Cells indexed `[column][row]`
    cells: Vec<Vec<Option<String>>>,
    definitions: HashMap<String, TileDefinition>,
}

impl TileMap {
    /// Create an empty map of `map_width` x `map_height` tiles
    pub fn new(
        map_width: u32,
        map_height: u32,
        image_file: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
    ) -> EngineResult<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(EngineError::invalid_argument(format!(
                "tile size must be positive, got {tile_width}x{tile_height}"
            )));
        }

        let cells = (0..map_width)
            .map(|_| vec![None; map_height as usize])
            .collect();

        Ok(Self {
            x: 0.0,
            y: 0.0,
            image_file: image_file.into(),
            map_width,
            map_height,
            tile_width,
            tile_height,
            cells,
            definitions: HashMap::new(),
        })
    }

    /// Place the map at a pixel offset
    #[must_use]
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Tileset image path
    pub fn image_file(&self) -> &str {
        &self.image_file
    }

    /// Width in tiles
    pub fn map_width(&self) -> u32 {
        self.map_width
    }

    /// Height in tiles
    pub fn map_height(&self) -> u32 {
        self.map_height
    }

    /// Tile width in pixels
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Define or redefine the tile called `name`
    pub fn define(&mut self, name: impl Into<String>, cell_x: u32, cell_y: u32, is_solid: bool) {
        self.definitions.insert(
            name.into(),
            TileDefinition {
                cell_x,
                cell_y,
                is_solid,
            },
        );
    }

    /// The definition registered under `name`
    pub fn get_definition(&self, name: &str) -> Option<&TileDefinition> {
        self.definitions.get(name)
    }

    /// Whether the tile called `name` is solid
    pub fn is_solid(&self, name: &str) -> EngineResult<bool> {
        self.definitions
            .get(name)
            .map(|definition| definition.is_solid)
            .ok_or_else(|| EngineError::invalid_argument(format!("tile '{name}' is not defined")))
    }

    /// Name of the tile at `(column, row)`; `None` when empty or off the grid
    pub fn get(&self, column: i32, row: i32) -> Option<&str> {
        let (column, row) = self.index(column, row)?;
        self.cells[column][row].as_deref()
    }

    /// Put the tile called `name` at `(column, row)`
    pub fn set(&mut self, column: i32, row: i32, name: &str) -> EngineResult<()> {
        if !self.definitions.contains_key(name) {
            return Err(EngineError::invalid_operation(format!(
                "tile '{name}' must be defined before it is placed"
            )));
        }
        let (c, r) = self.index_or_err(column, row)?;
        self.cells[c][r] = Some(name.to_owned());
        Ok(())
    }

    /// Empty the cell at `(column, row)`
    pub fn clear(&mut self, column: i32, row: i32) -> EngineResult<()> {
        let (c, r) = self.index_or_err(column, row)?;
        self.cells[c][r] = None;
        Ok(())
    }

    /// Put the tile called `name` in every cell
    pub fn fill(&mut self, name: &str) -> EngineResult<()> {
        if !self.definitions.contains_key(name) {
            return Err(EngineError::invalid_operation(format!(
                "tile '{name}' must be defined before it is placed"
            )));
        }
        for column in &mut self.cells {
            for cell in column.iter_mut() {
                *cell = Some(name.to_owned());
            }
        }
        Ok(())
    }

    /// Grid cell containing the scene pixel `(px, py)`
    ///
    /// The map offset is subtracted first. Points left of or above the map
    /// map to negative cells, which read as empty.
    pub fn tile_at(&self, px: f32, py: f32) -> (i32, i32) {
        let column = ((px - self.x) / self.tile_width as f32).floor() as i32;
        let row = ((py - self.y) / self.tile_height as f32).floor() as i32;
        (column, row)
    }

    /// Grid cell ending at the exclusive scene edge `(px, py)`
    ///
    /// Same as [`TileMap::tile_at`] except that an edge lying exactly on a
    /// cell boundary belongs to the cell before it.
    pub fn tile_ending_at(&self, px: f32, py: f32) -> (i32, i32) {
        let column = ((px - self.x) / self.tile_width as f32).ceil() as i32 - 1;
        let row = ((py - self.y) / self.tile_height as f32).ceil() as i32 - 1;
        (column, row)
    }

    /// Scene-space box of `(column, row)` if it holds a solid tile
    pub fn solid_box_at(&self, column: i32, row: i32) -> Option<Aabb> {
        let name = self.get(column, row)?;
        let solid = self.definitions.get(name).is_some_and(|d| d.is_solid);
        solid.then(|| self.cell_bounds(column, row))
    }

    /// Scene-space box of `(column, row)`, occupied or not
    pub fn cell_bounds(&self, column: i32, row: i32) -> Aabb {
        let width = self.tile_width as f32;
        let height = self.tile_height as f32;
        Aabb::new(
            self.x + column as f32 * width,
            self.y + row as f32 * height,
            width,
            height,
        )
    }

    /// Every occupied cell as `(column, row, name, definition)`
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, &str, Option<&TileDefinition>)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(column, cells)| {
            cells.iter().enumerate().filter_map(move |(row, cell)| {
                let name = cell.as_deref()?;
                Some((column as i32, row as i32, name, self.definitions.get(name)))
            })
        })
    }

    fn index(&self, column: i32, row: i32) -> Option<(usize, usize)> {
        let c = usize::try_from(column).ok()?;
        let r = usize::try_from(row).ok()?;
        (c < self.map_width as usize && r < self.map_height as usize).then_some((c, r))
    }

    fn index_or_err(&self, column: i32, row: i32) -> EngineResult<(usize, usize)> {
        self.index(column, row).ok_or_else(|| {
            EngineError::invalid_argument(format!(
                "cell ({column}, {row}) is outside the {}x{} map",
                self.map_width, self.map_height
            ))
        })
    }
}
