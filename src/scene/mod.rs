use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    error::CastError,
    types::{SurfaceSize, Vec2},
};

pub type EntityId = String;

/// Normalized `[0,100]²` positions keyed by entity.
pub type PositionMap = HashMap<EntityId, Vec2>;

/// Unordered pair of related entities.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Edge {
    pub a: EntityId,
    pub b: EntityId,
}

impl Edge {
    pub fn new(a: impl Into<EntityId>, b: impl Into<EntityId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}

/// Per-frame input supplied by the host view.
#[derive(Clone, Debug, Default)]
pub struct SceneInput {
    pub hover: Option<EntityId>,
    pub positions: PositionMap,
    pub edges: Vec<Edge>,
}

impl SceneInput {
    pub fn locate(&self, id: &str, size: SurfaceSize) -> Option<Vec2> {
        self.positions.get(id).map(|p| size.denormalize(*p))
    }

    /// Attraction point for this tick; an id missing from the map counts as no hover.
    pub fn hover_point(&self, size: SurfaceSize) -> Option<Vec2> {
        self.hover.as_deref().and_then(|id| self.locate(id, size))
    }

    /// Pixel endpoints of `edge`, or `None` when either side is unknown.
    pub fn edge_points(&self, edge: &Edge, size: SurfaceSize) -> Option<(Vec2, Vec2)> {
        Some((self.locate(&edge.a, size)?, self.locate(&edge.b, size)?))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Characters and their relationships as the demo view lays them out.
#[derive(Clone, Debug, Deserialize)]
pub struct Cast {
    pub characters: Vec<Character>,
    #[serde(default)]
    pub relationships: Vec<Edge>,
}

impl Cast {
    pub fn load(path: &Path) -> Result<Self, CastError> {
        let raw = fs::read_to_string(path).map_err(|source| CastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CastError> {
        let cast: Cast = serde_json::from_str(raw)?;
        cast.validate()?;
        Ok(cast)
    }

    fn validate(&self) -> Result<(), CastError> {
        let in_range = |v: f32| (0.0..=100.0).contains(&v);
        for ch in &self.characters {
            if !in_range(ch.x) || !in_range(ch.y) {
                return Err(CastError::OutOfRange {
                    id: ch.id.clone(),
                    x: ch.x,
                    y: ch.y,
                });
            }
        }
        for edge in &self.relationships {
            for id in [&edge.a, &edge.b] {
                if !self.characters.iter().any(|c| &c.id == id) {
                    return Err(CastError::UnknownEndpoint(id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn sample() -> Self {
        let characters = [
            ("mara", "Mara Voss", 22.0, 30.0),
            ("ilse", "Ilse Brand", 70.0, 22.0),
            ("tomas", "Tomas Reyes", 50.0, 55.0),
            ("quill", "Quill", 18.0, 75.0),
            ("odile", "Odile Marsh", 80.0, 70.0),
            ("bram", "Bram Kestrel", 45.0, 85.0),
        ]
        .into_iter()
        .map(|(id, name, x, y)| Character {
            id: id.to_string(),
            name: name.to_string(),
            x,
            y,
        })
        .collect();
        let relationships = [
            ("mara", "ilse"),
            ("mara", "tomas"),
            ("mara", "quill"),
            ("ilse", "odile"),
            ("tomas", "odile"),
            ("tomas", "bram"),
            ("quill", "bram"),
        ]
        .into_iter()
        .map(|(a, b)| Edge::new(a, b))
        .collect();
        Self {
            characters,
            relationships,
        }
    }

    pub fn positions(&self) -> PositionMap {
        self.characters
            .iter()
            .map(|c| (c.id.clone(), Vec2::new(c.x, c.y)))
            .collect()
    }

    pub fn active_edges(&self, hover: Option<&str>) -> Vec<Edge> {
        match hover {
            Some(id) => self
                .relationships
                .iter()
                .filter(|e| e.touches(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn scene(&self, hover: Option<&str>) -> SceneInput {
        SceneInput {
            hover: hover.map(str::to_string),
            positions: self.positions(),
            edges: self.active_edges(hover),
        }
    }
}
