//! The path network: an ordered polyline of axis-aligned corridor segments.
//!
//! Segment coordinates name the top-left corner of the corridor band, so a
//! corridor covers `[min, max + width]` on both axes and its center line sits
//! at `coord + width / 2`. Enemies walk the center line; towers must keep
//! clear of the band plus a fixed margin.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Position;

/// One straight corridor segment. Exactly one of the two axes changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

impl Segment {
    pub const fn new(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.start_x == self.end_x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start_y == self.end_y
    }

    /// Bounding box of the corridor expanded by `margin` on every side,
    /// as `(min_x, max_x, min_y, max_y)`. Independent of direction.
    fn expanded_bounds(&self, width: f32, margin: f32) -> (f32, f32, f32, f32) {
        (
            self.start_x.min(self.end_x) - margin,
            self.start_x.max(self.end_x) + width + margin,
            self.start_y.min(self.end_y) - margin,
            self.start_y.max(self.end_y) + width + margin,
        )
    }
}

/// The five-segment default map, shifted down by `offset_y` so it starts
/// below the HUD band.
pub fn default_segments(offset_y: f32) -> Vec<Segment> {
    vec![
        Segment::new(350.0, offset_y, 350.0, 150.0 + offset_y),
        Segment::new(350.0, 150.0 + offset_y, 550.0, 150.0 + offset_y),
        Segment::new(550.0, 150.0 + offset_y, 550.0, 350.0 + offset_y),
        Segment::new(550.0, 350.0 + offset_y, 150.0, 350.0 + offset_y),
        Segment::new(150.0, 350.0 + offset_y, 150.0, 600.0 + offset_y),
    ]
}

/// Static ordered path plus corridor geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNetwork {
    segments: Vec<Segment>,
    width: f32,
    margin: f32,
}

impl PathNetwork {
    /// Build a network, rejecting empty paths, segments that are not
    /// strictly horizontal or vertical, and gaps between consecutive segments.
    pub fn new(segments: Vec<Segment>, width: f32, margin: f32) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        for (index, seg) in segments.iter().enumerate() {
            if seg.is_vertical() && seg.is_horizontal() {
                return Err(ConfigError::DegenerateSegment { index });
            }
            if !seg.is_vertical() && !seg.is_horizontal() {
                return Err(ConfigError::DiagonalSegment { index });
            }
        }
        for (index, pair) in segments.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.end_x != next.start_x || prev.end_y != next.start_y {
                return Err(ConfigError::DisconnectedSegment { index: index + 1 });
            }
        }
        Ok(Self {
            segments,
            width,
            margin,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Center line of a corridor whose edge sits at `coord`.
    pub fn corridor_center(&self, coord: f32) -> f32 {
        coord + self.width / 2.0
    }

    /// Where enemies enter: the corridor center at the first segment's start.
    pub fn spawn_point(&self) -> Position {
        let first = &self.segments[0];
        Position::new(
            self.corridor_center(first.start_x),
            self.corridor_center(first.start_y),
        )
    }

    /// True if the point falls inside any segment's corridor band expanded
    /// by the placement margin. Bounds are inclusive.
    pub fn is_inside_corridor(&self, x: f32, y: f32) -> bool {
        self.segments.iter().any(|seg| {
            let (min_x, max_x, min_y, max_y) = seg.expanded_bounds(self.width, self.margin);
            x >= min_x && x <= max_x && y >= min_y && y <= max_y
        })
    }

    /// A tower of side `tower_size` centered at `(x, y)` is clear of the path
    /// if neither its center nor any of its four corners is in a corridor.
    pub fn can_place_tower(&self, x: f32, y: f32, tower_size: f32) -> bool {
        let half = tower_size / 2.0;
        let probes = [
            (x, y),
            (x - half, y - half),
            (x + half, y - half),
            (x - half, y + half),
            (x + half, y + half),
        ];
        probes
            .iter()
            .all(|&(px, py)| !self.is_inside_corridor(px, py))
    }

    /// Centers of the grid cells (side `cell`) covering a `width` x `height`
    /// area whose center lies outside every corridor.
    pub fn buildable_cells(&self, cell: f32, width: f32, height: f32) -> Vec<Position> {
        let mut cells = Vec::new();
        if cell <= 0.0 {
            return cells;
        }
        let mut y = 0.0;
        while y < height {
            let mut x = 0.0;
            while x < width {
                let center = Position::new(x + cell / 2.0, y + cell / 2.0);
                if !self.is_inside_corridor(center.x, center.y) {
                    cells.push(center);
                }
                x += cell;
            }
            y += cell;
        }
        cells
    }
}
