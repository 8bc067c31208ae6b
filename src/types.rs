use glam::{Vec3, Vec4};

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
}

/// Per-vertex outputs of the vertex stage. `normal` is world-space and stays
/// unnormalized until a shading computation needs it.
#[derive(Clone, Copy, Debug)]
pub struct Varyings {
    pub clip: Vec4,
    pub screen: Vec3,
    pub inv_w: f32,
    pub normal: Vec3,
    pub color: Vec4,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}
