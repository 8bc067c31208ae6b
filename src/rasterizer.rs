use glam::{vec3, Vec3, Vec4};

use crate::shader::{fragment_stage, ShadeMode};
use crate::types::Varyings;

pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
pub const CHUNK_ROWS: usize = 16;

/// A horizontal slice of the frame, rasterized independently of the others.
pub struct Band<'a> {
    pub color: &'a mut [u32],
    pub depth: &'a mut [f32],
    pub w: usize,
    pub y0: i32,
    pub y1: i32,
}

#[inline]
fn band_idx(band: &Band, x: i32, y: i32) -> usize {
    let local_row = (y - band.y0) as usize;
    local_row * band.w + (x as usize)
}

fn ndc_depth_to_zbuf(ndc_z: f32) -> f32 {
    0.5 * (ndc_z + 1.0)
}

pub fn edge(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
pub fn clamp_i32(v: i32, lo: i32, hi: i32) -> i32 {
    v.max(lo).min(hi)
}

pub fn to_screen(p: Vec3) -> Vec3 {
    let x = ((p.x + 1.0) * 0.5) * (WIDTH as f32);
    let y = (1.0 - (p.y + 1.0) * 0.5) * (HEIGHT as f32);
    vec3(x, y, p.z)
}

// Stage outputs are only forced into [0, 1] here, at packing time.
#[inline]
pub fn pack_argb(c: Vec4) -> u32 {
    let c = c.clamp(Vec4::ZERO, Vec4::ONE);
    let a = (c.w * 255.0) as u32;
    let r = (c.x * 255.0) as u32;
    let g = (c.y * 255.0) as u32;
    let b = (c.z * 255.0) as u32;
    (a << 24) | (r << 16) | (g << 8) | b
}

pub fn draw_triangle_band(
    band: &mut Band,
    v0: &Varyings,
    v1: &Varyings,
    v2: &Varyings,
    mode: ShadeMode,
) {
    let p0 = v0.screen;
    let p1 = v1.screen;
    let p2 = v2.screen;

    let area = edge(p0, p1, p2);
    if area >= 0.0 {
        return;
    }
    let inv_area = 1.0 / area;

    let min_x = p0.x.min(p1.x).min(p2.x).floor().max(0.0) as i32;
    let max_x = p0.x.max(p1.x).max(p2.x).ceil().min((band.w - 1) as f32) as i32;
    let mut min_y = p0.y.min(p1.y).min(p2.y).floor() as i32;
    let mut max_y = p0.y.max(p1.y).max(p2.y).ceil() as i32;
    min_y = clamp_i32(min_y, band.y0, band.y1 - 1);
    max_y = clamp_i32(max_y, band.y0, band.y1 - 1);
    if min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = vec3(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let w0 = edge(p1, p2, p) * inv_area;
            let w1 = edge(p2, p0, p) * inv_area;
            let w2 = edge(p0, p1, p) * inv_area;

            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let invw = v0.inv_w * w0 + v1.inv_w * w1 + v2.inv_w * w2;
            let recip = 1.0 / invw;

            let clip_z = v0.clip.z * w0 + v1.clip.z * w1 + v2.clip.z * w2;
            let clip_w = v0.clip.w * w0 + v1.clip.w * w1 + v2.clip.w * w2;
            let z = ndc_depth_to_zbuf(clip_z / clip_w);
            let idx = band_idx(band, x, y);
            if z >= band.depth[idx] {
                continue;
            }

            // Perspective-correct varyings: attribute / w, interpolate, divide.
            let normal = (v0.normal * v0.inv_w * w0
                + v1.normal * v1.inv_w * w1
                + v2.normal * v2.inv_w * w2)
                * recip;
            let color = (v0.color * v0.inv_w * w0
                + v1.color * v1.inv_w * w1
                + v2.color * v2.inv_w * w2)
                * recip;

            band.color[idx] = pack_argb(fragment_stage(mode, normal, color));
            band.depth[idx] = z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::vertex_stage;
    use crate::types::Vertex;
    use glam::{vec4, Mat3, Mat4};

    fn full_frame_band<'a>(color: &'a mut [u32], depth: &'a mut [f32]) -> Band<'a> {
        Band {
            color,
            depth,
            w: WIDTH,
            y0: 0,
            y1: HEIGHT as i32,
        }
    }

    fn screen_vertex(position: Vec3, color: Vec4) -> Varyings {
        let v = Vertex {
            position,
            normal: Vec3::Y,
            color,
        };
        vertex_stage(Mat4::IDENTITY, Mat3::IDENTITY, &v)
    }

    // A clip-space triangle large enough to cover the whole viewport, wound
    // front-facing for the y-down screen mapping.
    fn fullscreen_triangle(color: Vec4) -> [Varyings; 3] {
        [
            screen_vertex(vec3(-3.0, -3.0, 0.0), color),
            screen_vertex(vec3(3.0, -3.0, 0.0), color),
            screen_vertex(vec3(0.0, 3.0, 0.0), color),
        ]
    }

    #[test]
    fn to_screen_maps_ndc_corners() {
        let top_left = to_screen(vec3(-1.0, 1.0, 0.0));
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
        let bottom_right = to_screen(vec3(1.0, -1.0, 0.0));
        assert_eq!(
            (bottom_right.x, bottom_right.y),
            (WIDTH as f32, HEIGHT as f32)
        );
    }

    #[test]
    fn pack_argb_clamps_out_of_gamut_channels() {
        assert_eq!(pack_argb(vec4(2.0, -1.0, 0.5, 1.0)), 0xFFFF007F);
    }

    // Channel values are chosen mid-quantization-interval so a 1-ulp wobble
    // from the perspective-correct divide cannot flip a byte.
    #[test]
    fn constant_color_triangle_packs_to_its_own_color() {
        let c = vec4(0.33, 0.66, 0.11, 0.9);
        let mut color = vec![0u32; WIDTH * HEIGHT];
        let mut depth = vec![1.0f32; WIDTH * HEIGHT];
        let [a, b, d] = fullscreen_triangle(c);
        let mut band = full_frame_band(&mut color, &mut depth);
        draw_triangle_band(&mut band, &a, &b, &d, ShadeMode::VertexColor);

        let center = color[(HEIGHT / 2) * WIDTH + WIDTH / 2];
        assert_eq!(center, pack_argb(c));
    }

    #[test]
    fn depth_test_keeps_nearer_fragment() {
        let near_color = vec4(0.33, 0.11, 0.11, 0.9);
        let far_color = vec4(0.11, 0.11, 0.66, 0.9);
        let mut color = vec![0u32; WIDTH * HEIGHT];
        let mut depth = vec![1.0f32; WIDTH * HEIGHT];

        let near: Vec<Varyings> = [
            vec3(-3.0, -3.0, -0.5),
            vec3(3.0, -3.0, -0.5),
            vec3(0.0, 3.0, -0.5),
        ]
        .iter()
        .map(|&p| screen_vertex(p, near_color))
        .collect();
        let far: Vec<Varyings> = [
            vec3(-3.0, -3.0, 0.5),
            vec3(3.0, -3.0, 0.5),
            vec3(0.0, 3.0, 0.5),
        ]
        .iter()
        .map(|&p| screen_vertex(p, far_color))
        .collect();

        let mut band = full_frame_band(&mut color, &mut depth);
        draw_triangle_band(&mut band, &near[0], &near[1], &near[2], ShadeMode::VertexColor);
        draw_triangle_band(&mut band, &far[0], &far[1], &far[2], ShadeMode::VertexColor);

        let center = color[(HEIGHT / 2) * WIDTH + WIDTH / 2];
        assert_eq!(center, pack_argb(near_color));
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let mut color = vec![0u32; WIDTH * HEIGHT];
        let mut depth = vec![1.0f32; WIDTH * HEIGHT];
        let [a, b, c] = fullscreen_triangle(vec4(0.33, 0.11, 0.11, 0.9));
        let mut band = full_frame_band(&mut color, &mut depth);
        // Reversed winding flips the area sign.
        draw_triangle_band(&mut band, &c, &b, &a, ShadeMode::VertexColor);

        assert!(color.iter().all(|&px| px == 0));
    }
}
