use glam::{vec3, vec4, Mat3, Mat4, Vec3, Vec4};

use crate::rasterizer::to_screen;
use crate::types::{Varyings, Vertex};

/// Per-draw transform state supplied by the host.
#[derive(Clone, Copy, Debug)]
pub struct DrawUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub perspective: Mat4,
}

impl DrawUniforms {
    pub const IDENTITY: Self = Self {
        model: Mat4::IDENTITY,
        view: Mat4::IDENTITY,
        perspective: Mat4::IDENTITY,
    };

    pub fn mvp(&self) -> Mat4 {
        self.perspective * self.view * self.model
    }

    // Upper 3x3 of the model matrix, inverted and transposed, so normals stay
    // perpendicular to surfaces under non-uniform scaling. The model matrix
    // must be non-singular; a singular one silently yields garbage normals.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.model).inverse().transpose()
    }
}

impl Default for DrawUniforms {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub fn vertex_stage(mvp: Mat4, normal_matrix: Mat3, v: &Vertex) -> Varyings {
    let clip = mvp * v.position.extend(1.0);
    let inv_w = 1.0 / clip.w;
    let screen = to_screen(clip.truncate() * inv_w);
    Varyings {
        clip,
        screen,
        inv_w,
        normal: normal_matrix * v.normal,
        color: v.color,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadeMode {
    #[default]
    VertexColor,
    DirectionalRamp,
}

// The ramp light vector is not unit length: against unit normals the dot
// product spans roughly [-3.74, 3.74], so `a` can leave [0, 1] and the lerp
// extrapolates past the two grays.
const RAMP_LIGHT_DIR: Vec3 = vec3(-2.0, -1.0, -3.0);
const RAMP_DARK: Vec4 = vec4(0.1, 0.1, 0.1, 1.0);
const RAMP_LIGHT: Vec4 = vec4(0.7, 0.7, 0.7, 1.0);

pub fn fragment_stage(mode: ShadeMode, normal: Vec3, color: Vec4) -> Vec4 {
    match mode {
        ShadeMode::VertexColor => color,
        ShadeMode::DirectionalRamp => {
            let a = (normal.normalize().dot(RAMP_LIGHT_DIR) + 1.0) * 0.5;
            RAMP_DARK.lerp(RAMP_LIGHT, a)
        }
    }
}
