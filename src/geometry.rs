use glam::{vec3, vec4, Vec3, Vec4};

use crate::types::{Mesh, Vertex};

pub fn make_cube(size: f32) -> Mesh {
    let s = size * 0.5;
    let p = [
        vec3(-s, -s,  s), vec3( s, -s,  s), vec3( s,  s,  s), vec3(-s,  s,  s),
        vec3(-s, -s, -s), vec3(-s,  s, -s), vec3( s,  s, -s), vec3( s, -s, -s),
        vec3(-s,  s, -s), vec3(-s,  s,  s), vec3( s,  s,  s), vec3( s,  s, -s),
        vec3(-s, -s, -s), vec3( s, -s, -s), vec3( s, -s,  s), vec3(-s, -s,  s),
        vec3( s, -s, -s), vec3( s,  s, -s), vec3( s,  s,  s), vec3( s, -s,  s),
        vec3(-s, -s, -s), vec3(-s, -s,  s), vec3(-s,  s,  s), vec3(-s,  s, -s),
    ];
    let n: [Vec3; 24] = [
        vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 1.0),
        vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0), vec3(0.0, 0.0, -1.0),
        vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0),
        vec3(0.0, -1.0, 0.0), vec3(0.0, -1.0, 0.0), vec3(0.0, -1.0, 0.0), vec3(0.0, -1.0, 0.0),
        vec3(1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0),
        vec3(-1.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0),
    ];
    // One flat color per face.
    let face_colors: [Vec4; 6] = [
        vec4(0.9, 0.2, 0.2, 1.0),
        vec4(0.2, 0.9, 0.2, 1.0),
        vec4(0.2, 0.2, 0.9, 1.0),
        vec4(0.9, 0.9, 0.2, 1.0),
        vec4(0.9, 0.2, 0.9, 1.0),
        vec4(0.2, 0.9, 0.9, 1.0),
    ];

    let mut vertices = Vec::with_capacity(24);
    for i in 0..24 {
        vertices.push(Vertex { position: p[i], normal: n[i], color: face_colors[i / 4] });
    }
    let triangles: Vec<[u32; 3]> = vec![
        [0, 1, 2], [0, 2, 3],
        [4, 5, 6], [4, 6, 7],
        [8, 9, 10], [8, 10, 11],
        [12, 13, 14], [12, 14, 15],
        [16, 17, 18], [16, 18, 19],
        [20, 21, 22], [20, 22, 23],
    ];
    Mesh { vertices, triangles }
}

pub fn make_uv_sphere(rings: u32, segments: u32, radius: f32) -> Mesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut vertices: Vec<Vertex> =
        Vec::with_capacity((rings as usize + 1) * (segments as usize + 1));
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        let (st, ct) = theta.sin_cos();
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sp, cp) = phi.sin_cos();
            let n = vec3(cp * st, ct, sp * st);
            let pos = n * radius;
            // Normal-derived gradient so interpolation is visible across faces.
            let color = (n * 0.5 + 0.5).extend(1.0);
            vertices.push(Vertex { position: pos, normal: n, color });
        }
    }
    let stride = (segments + 1) as usize;
    let mut triangles: Vec<[u32; 3]> =
        Vec::with_capacity((rings as usize) * (segments as usize) * 2);
    for r in 0..rings {
        for s in 0..segments {
            let i0 = (r as usize) * stride + (s as usize);
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            triangles.push([i0 as u32, i1 as u32, i2 as u32]);
            triangles.push([i1 as u32, i3 as u32, i2 as u32]);
        }
    }
    Mesh { vertices, triangles }
}
