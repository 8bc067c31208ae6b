use glam::{vec4, Vec4};
use log::{debug, warn};
use rayon::prelude::*;
use tokio::sync::{mpsc, watch};

use crate::clipping::clip_triangle_near;
use crate::rasterizer::{
    clamp_i32, draw_triangle_band, edge, pack_argb, Band, CHUNK_ROWS, HEIGHT, WIDTH,
};
use crate::shader::{vertex_stage, DrawUniforms, ShadeMode};
use crate::types::{Mesh, Varyings};

/// One mesh drawn with its own transform state.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall {
    pub mesh: usize,
    pub uniforms: DrawUniforms,
}

/// Frame-wide state the host publishes before submitting a framebuffer.
#[derive(Clone, Debug)]
pub struct FrameParams {
    pub draws: Vec<DrawCall>,
    pub mode: ShadeMode,
    pub clear: Vec4,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            draws: Vec::new(),
            mode: ShadeMode::default(),
            clear: vec4(0.8, 0.8, 1.0, 1.0),
        }
    }
}

/// Owns the meshes and depth buffer; trades framebuffers with the host over
/// channels and renders each one with the latest published params.
pub struct RenderWorker {
    pub to_worker_rx: mpsc::Receiver<Vec<u32>>,
    pub from_worker_tx: mpsc::Sender<Vec<u32>>,
    pub scene_rx: watch::Receiver<FrameParams>,
    pub meshes: Vec<Mesh>,
}

impl RenderWorker {
    pub async fn run(mut self) {
        let mut depth = vec![1.0f32; WIDTH * HEIGHT];

        while let Some(mut color) = self.to_worker_rx.recv().await {
            let params = self.scene_rx.borrow().clone();

            color.fill(pack_argb(params.clear));
            depth.fill(1.0);

            let mut clipped_tris: Vec<[Varyings; 3]> = Vec::new();
            for draw in &params.draws {
                let Some(mesh) = self.meshes.get(draw.mesh) else {
                    warn!("draw call references missing mesh {}", draw.mesh);
                    continue;
                };
                let mvp = draw.uniforms.mvp();
                let normal_matrix = draw.uniforms.normal_matrix();

                let var: Vec<Varyings> = mesh
                    .vertices
                    .par_iter()
                    .map(|v| vertex_stage(mvp, normal_matrix, v))
                    .collect();

                for t in &mesh.triangles {
                    let a = var[t[0] as usize];
                    let b = var[t[1] as usize];
                    let c = var[t[2] as usize];
                    if edge(a.screen, b.screen, c.screen) >= 0.0 {
                        continue;
                    }
                    for tri in clip_triangle_near(&a, &b, &c) {
                        clipped_tris.push(tri);
                    }
                }
            }
            debug!("{} triangles after cull and clip", clipped_tris.len());

            let rows_per_band = CHUNK_ROWS;
            let num_bands = HEIGHT.div_ceil(rows_per_band);

            let mut bins: Vec<Vec<usize>> = vec![Vec::new(); num_bands];
            for (ti, tri) in clipped_tris.iter().enumerate() {
                let a = tri[0].screen;
                let b = tri[1].screen;
                let c = tri[2].screen;
                let min_y = clamp_i32(
                    a.y.min(b.y).min(c.y).floor() as i32,
                    0,
                    (HEIGHT - 1) as i32,
                );
                let max_y = clamp_i32(
                    a.y.max(b.y).max(c.y).ceil() as i32,
                    0,
                    (HEIGHT - 1) as i32,
                );
                let first_band = (min_y as usize) / rows_per_band;
                let last_band = (max_y as usize) / rows_per_band;
                for bin in bins.iter_mut().take(last_band + 1).skip(first_band) {
                    bin.push(ti);
                }
            }

            let mut bands: Vec<Band> = Vec::new();
            let mut y0 = 0usize;
            for (c_chunk, d_chunk) in color
                .chunks_mut(rows_per_band * WIDTH)
                .zip(depth.chunks_mut(rows_per_band * WIDTH))
            {
                let rows = c_chunk.len() / WIDTH;
                if rows == 0 {
                    continue;
                }
                bands.push(Band {
                    color: c_chunk,
                    depth: d_chunk,
                    w: WIDTH,
                    y0: y0 as i32,
                    y1: (y0 + rows) as i32,
                });
                y0 += rows;
            }

            let mode = params.mode;
            bands
                .into_par_iter()
                .zip(bins.into_par_iter())
                .for_each(|(mut band, bin)| {
                    for &ti in &bin {
                        let tri = &clipped_tris[ti];
                        draw_triangle_band(&mut band, &tri[0], &tri[1], &tri[2], mode);
                    }
                });

            if self.from_worker_tx.send(color).await.is_err() {
                break;
            }
        }
        debug!("render worker stopped");
    }
}
