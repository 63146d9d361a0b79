//! Minimal scene graph for the moving marker: an immutable triangle mesh shared
//! by every instance, plus a per-instance transform.

use crate::error::{GlobeError, Result};
use glam::{Mat4, Quat, Vec3, Vec4};
use std::rc::Rc;

/// Flattened triangle mesh with node transforms baked in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append another mesh with its vertices transformed by `matrix`.
    fn append(&mut self, other: &Mesh, matrix: Mat4) {
        let base = self.positions.len() as u32;
        let normal_matrix = matrix.inverse().transpose();
        self.positions
            .extend(other.positions.iter().map(|p| matrix.transform_point3(*p)));
        self.normals.extend(
            other
                .normals
                .iter()
                .map(|n| normal_matrix.transform_vector3(*n).normalize_or_zero()),
        );
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Position, rotation and scale of a node instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Renderable node. Cloning shares the mesh and copies the transform, so an
/// instance can be moved and rotated without touching the template it came from.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub mesh: Rc<Mesh>,
    pub transform: Transform,
}

impl SceneNode {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh: Rc::new(mesh),
            transform: Transform::default(),
        }
    }

    pub fn set_scale(&mut self, s: f32) {
        self.transform.scale = Vec3::splat(s);
    }

    /// `true` when both nodes draw the same mesh allocation.
    pub fn shares_mesh_with(&self, other: &SceneNode) -> bool {
        Rc::ptr_eq(&self.mesh, &other.mesh)
    }

    /// Import a self-contained glTF asset (`.glb`, or `.gltf` with data URIs).
    pub fn from_gltf_slice(bytes: &[u8]) -> Result<Self> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Self::from_gltf_parts(&document, &buffers)
    }

    /// Build the default scene from a parsed document and the contents of
    /// its buffers, in document order. External buffers are fetched by the
    /// caller, see [`buffer_url`].
    pub fn from_gltf_parts(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<Self> {
        for buffer in document.buffers() {
            let index = buffer.index();
            let data = buffers.get(index).ok_or(GlobeError::MissingBuffer { index })?;
            if data.0.len() < buffer.length() {
                return Err(GlobeError::BufferTooShort {
                    index,
                    expected: buffer.length(),
                    actual: data.0.len(),
                });
            }
        }
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(GlobeError::EmptyModel)?;
        let mut mesh = Mesh::default();
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, buffers, &mut mesh);
        }
        if mesh.is_empty() {
            return Err(GlobeError::EmptyModel);
        }
        log::info!(
            "[assets] model imported: vertices={} triangles={}",
            mesh.positions.len(),
            mesh.indices.len() / 3
        );
        Ok(Self::new(mesh))
    }
}

/// URL of a buffer `uri` referenced by the model served at `model_url`.
/// Data URIs and absolute URLs are returned as-is.
pub fn buffer_url(model_url: &str, uri: &str) -> String {
    if uri.starts_with("data:") || uri.starts_with('/') || uri.contains("://") {
        return uri.to_string();
    }
    match model_url.rfind('/') {
        Some(i) => format!("{}{}", &model_url[..=i], uri),
        None => uri.to_string(),
    }
}

fn collect_node(node: &gltf::Node, parent: Mat4, buffers: &[gltf::buffer::Data], out: &mut Mesh) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            if let Some(part) = read_primitive(&primitive, buffers) {
                out.append(&part, world);
            }
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Option<Mesh> {
    let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
    let positions: Vec<Vec3> = reader.read_positions()?.map(Vec3::from).collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(n) => n.map(Vec3::from).collect(),
        None => face_normals(&positions, &indices),
    };
    let color = Vec4::from(
        primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor(),
    );
    Some(Mesh {
        colors: vec![color; positions.len()],
        positions,
        normals,
        indices,
    })
}

fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            colors: vec![Vec4::ONE; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn clone_shares_mesh_but_not_transform() {
        let template = SceneNode::new(triangle());
        let mut copy = template.clone();
        copy.transform.translation = Vec3::new(1.0, 2.0, 3.0);
        assert!(copy.shares_mesh_with(&template));
        assert_eq!(template.transform.translation, Vec3::ZERO);
    }

    #[test]
    fn face_normals_follow_winding() {
        let m = triangle();
        let n = face_normals(&m.positions, &m.indices);
        assert!(n.iter().all(|v| (*v - Vec3::Z).length() < 1e-6));
    }

    const SIDECAR_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "accessors": [{
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "buffers": [{ "uri": "plane.bin", "byteLength": 36 }]
    }"#;

    fn sidecar_bin() -> Vec<u8> {
        [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect()
    }

    #[test]
    fn external_buffer_is_supplied_by_caller() {
        let gltf = gltf::Gltf::from_slice(SIDECAR_GLTF.as_bytes()).expect("valid document");
        let node = SceneNode::from_gltf_parts(&gltf.document, &[gltf::buffer::Data(sidecar_bin())])
            .expect("imports");
        assert_eq!(node.mesh.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(node.mesh.indices, vec![0, 1, 2]);
        assert!(node.mesh.normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
    }

    #[test]
    fn external_buffer_cannot_be_read_from_the_document_alone() {
        assert!(SceneNode::from_gltf_slice(SIDECAR_GLTF.as_bytes()).is_err());
    }

    #[test]
    fn missing_or_short_buffers_are_rejected() {
        let gltf = gltf::Gltf::from_slice(SIDECAR_GLTF.as_bytes()).expect("valid document");
        assert!(matches!(
            SceneNode::from_gltf_parts(&gltf.document, &[]),
            Err(GlobeError::MissingBuffer { index: 0 })
        ));
        let short = gltf::buffer::Data(sidecar_bin()[..12].to_vec());
        assert!(matches!(
            SceneNode::from_gltf_parts(&gltf.document, &[short]),
            Err(GlobeError::BufferTooShort { expected: 36, actual: 12, .. })
        ));
    }

    #[test]
    fn buffer_urls_resolve_next_to_the_model() {
        assert_eq!(buffer_url("/plane.gltf", "plane.bin"), "/plane.bin");
        assert_eq!(buffer_url("/assets/plane.gltf", "plane.bin"), "/assets/plane.bin");
        assert_eq!(buffer_url("plane.gltf", "plane.bin"), "plane.bin");
        let data = "data:application/octet-stream;base64,AAAA";
        assert_eq!(buffer_url("/plane.gltf", data), data);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(SceneNode::from_gltf_slice(b"not a model").is_err());
    }
}
