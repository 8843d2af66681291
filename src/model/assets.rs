//! Mesh assets packed into one shared vertex pool.
//!
//! Mesh files are plain text: the first token is the total float count `N`,
//! followed by `N` floats, eight per vertex (position xyz, texcoord uv,
//! normal xyz).

use std::fs;
use std::ops::Range;
use std::path::Path;

use tracing::{debug, info};

use crate::error::AssetLoadError;

/// position 3 + texcoord 2 + normal 3
pub const FLOATS_PER_VERTEX: usize = 8;

/// Names of the meshes a level needs.
pub const MESH_CUBE: &str = "cube";
pub const MESH_KEY: &str = "key";
pub const MESH_GOAL: &str = "goal";

/// A mesh's slice of the vertex pool, in vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRange {
    pub start: u32,
    pub count: u32,
}

impl MeshRange {
    pub fn vertices(self) -> Range<u32> {
        self.start..self.start + self.count
    }
}

/// Name to mesh-range lookup over a single packed vertex pool.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    pool: Vec<f32>,
    meshes: Vec<(String, MeshRange)>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<models_dir>/<name>.txt` for every name, in order.
    pub fn load_dir(models_dir: impl AsRef<Path>, names: &[&str]) -> Result<Self, AssetLoadError> {
        let models_dir = models_dir.as_ref();
        let mut registry = Self::new();
        for name in names {
            registry.add_mesh_file(name, models_dir.join(format!("{name}.txt")))?;
        }
        info!(
            "Packed {} meshes, {} vertices total",
            registry.meshes.len(),
            registry.vertex_count()
        );
        Ok(registry)
    }

    pub fn add_mesh_file(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<MeshRange, AssetLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AssetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_mesh_str(name, &text)
    }

    /// Parse a mesh and append it to the pool. The range is fixed from here on.
    pub fn add_mesh_str(&mut self, name: &str, text: &str) -> Result<MeshRange, AssetLoadError> {
        if self.meshes.iter().any(|(n, _)| n == name) {
            return Err(AssetLoadError::DuplicateMesh(name.to_string()));
        }
        let floats = parse_mesh(name, text)?;
        let range = MeshRange {
            start: self.vertex_count(),
            count: (floats.len() / FLOATS_PER_VERTEX) as u32,
        };
        self.pool.extend_from_slice(&floats);
        self.meshes.push((name.to_string(), range));
        debug!("Mesh `{}`: vertices {}..{}", name, range.start, range.start + range.count);
        Ok(range)
    }

    pub fn mesh(&self, name: &str) -> Result<MeshRange, AssetLoadError> {
        self.meshes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| *r)
            .ok_or_else(|| AssetLoadError::MissingMesh(name.to_string()))
    }

    /// Interleaved vertex data of every mesh, ready for upload.
    pub fn vertex_pool(&self) -> &[f32] {
        &self.pool
    }

    pub fn vertex_count(&self) -> u32 {
        (self.pool.len() / FLOATS_PER_VERTEX) as u32
    }
}

fn parse_mesh(name: &str, text: &str) -> Result<Vec<f32>, AssetLoadError> {
    let mut tokens = text.split_whitespace();
    let header = tokens.next().ok_or_else(|| AssetLoadError::MissingHeader {
        name: name.to_string(),
    })?;
    let declared: usize = header.parse().map_err(|_| AssetLoadError::InvalidNumber {
        name: name.to_string(),
        token: header.to_string(),
    })?;
    if declared % FLOATS_PER_VERTEX != 0 {
        return Err(AssetLoadError::BadStride {
            name: name.to_string(),
            count: declared,
        });
    }

    // Grows with the floats present, never with the header
    let mut floats = Vec::new();
    for token in tokens.take(declared) {
        let value: f32 = token.parse().map_err(|_| AssetLoadError::InvalidNumber {
            name: name.to_string(),
            token: token.to_string(),
        })?;
        floats.push(value);
    }
    if floats.len() < declared {
        return Err(AssetLoadError::Truncated {
            name: name.to_string(),
            declared,
            found: floats.len(),
        });
    }
    Ok(floats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// One triangle: 3 vertices, 24 floats.
    const TRIANGLE: &str = "24
        0 0 0  0 0  0 0 1
        1 0 0  1 0  0 0 1
        0 1 0  0 1  0 0 1";

    #[test]
    fn test_meshes_pack_back_to_back() {
        let mut registry = AssetRegistry::new();
        let a = registry.add_mesh_str("a", TRIANGLE).unwrap();
        let b = registry.add_mesh_str("b", TRIANGLE).unwrap();

        assert_eq!(a, MeshRange { start: 0, count: 3 });
        assert_eq!(b, MeshRange { start: 3, count: 3 });
        assert_eq!(b.vertices(), 3..6);
        assert_eq!(registry.vertex_count(), 6);
        assert_eq!(registry.vertex_pool().len(), 48);
        // Second copy starts with the first vertex's position
        assert_eq!(&registry.vertex_pool()[24..27], &[0.0, 0.0, 0.0]);
        assert_eq!(registry.mesh("b").unwrap(), b);
    }

    #[test]
    fn test_malformed_meshes() {
        let mut registry = AssetRegistry::new();
        assert!(matches!(
            registry.add_mesh_str("empty", "  "),
            Err(AssetLoadError::MissingHeader { .. })
        ));
        assert!(matches!(
            registry.add_mesh_str("stride", "12 0 0 0 0 0 0 0 0 0 0 0 0"),
            Err(AssetLoadError::BadStride { count: 12, .. })
        ));
        assert!(matches!(
            registry.add_mesh_str("short", "16 1 2 3"),
            Err(AssetLoadError::Truncated { declared: 16, found: 3, .. })
        ));
        assert!(matches!(
            registry.add_mesh_str("nan", "8 1 2 x 4 5 6 7 8"),
            Err(AssetLoadError::InvalidNumber { .. })
        ));
        // Failed loads leave the pool untouched
        assert_eq!(registry.vertex_count(), 0);
    }

    #[test]
    fn test_oversized_header_is_truncated_error() {
        let mut registry = AssetRegistry::new();
        assert!(matches!(
            registry.add_mesh_str("huge", "18446744073709551608 0 0 0 0 0 0 0 0"),
            Err(AssetLoadError::Truncated { found: 8, .. })
        ));
        assert!(matches!(
            registry.add_mesh_str("large", "800000000 1 2 3"),
            Err(AssetLoadError::Truncated { declared: 800000000, found: 3, .. })
        ));
        assert_eq!(registry.vertex_count(), 0);
    }

    #[test]
    fn test_duplicate_and_missing_names() {
        let mut registry = AssetRegistry::new();
        registry.add_mesh_str("cube", TRIANGLE).unwrap();
        assert!(matches!(
            registry.add_mesh_str("cube", TRIANGLE),
            Err(AssetLoadError::DuplicateMesh(_))
        ));
        assert!(matches!(registry.mesh("teapot"), Err(AssetLoadError::MissingMesh(_))));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in [MESH_CUBE, MESH_KEY] {
            let mut file = fs::File::create(dir.path().join(format!("{name}.txt"))).unwrap();
            file.write_all(TRIANGLE.as_bytes()).unwrap();
        }

        let registry = AssetRegistry::load_dir(dir.path(), &[MESH_CUBE, MESH_KEY]).unwrap();
        assert_eq!(registry.mesh(MESH_KEY).unwrap().start, 3);

        let err = AssetRegistry::load_dir(dir.path(), &[MESH_GOAL]).unwrap_err();
        assert!(matches!(err, AssetLoadError::Io { .. }));
    }
}
