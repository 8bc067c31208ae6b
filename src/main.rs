use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::{vec3, vec4, Mat4, Vec3};
use log::info;
use tokio::sync::{mpsc, watch};

use facet3d::engine::{DrawCall, FrameParams, RenderWorker};
use facet3d::geometry::{make_cube, make_uv_sphere};
use facet3d::rasterizer::{HEIGHT, WIDTH};
use facet3d::shader::{DrawUniforms, ShadeMode};

const FRAME_COUNT: usize = 8;
const OUT_DIR: &str = "frames";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (to_worker_tx, to_worker_rx) = mpsc::channel::<Vec<u32>>(2);
    let (from_worker_tx, mut from_worker_rx) = mpsc::channel::<Vec<u32>>(2);
    let (scene_tx, scene_rx) = watch::channel(FrameParams::default());

    let worker = RenderWorker {
        to_worker_rx,
        from_worker_tx,
        scene_rx,
        meshes: vec![make_cube(1.6), make_uv_sphere(32, 48, 1.2)],
    };
    tokio::spawn(worker.run());

    let view = Mat4::look_at_rh(vec3(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let aspect = WIDTH as f32 / HEIGHT as f32;
    let perspective = Mat4::perspective_rh_gl(60f32.to_radians(), aspect, 0.1, 100.0);

    std::fs::create_dir_all(OUT_DIR).with_context(|| format!("creating {OUT_DIR}/"))?;

    let mut buffer = vec![0u32; WIDTH * HEIGHT];
    for frame in 0..FRAME_COUNT {
        let angle = frame as f32 * (std::f32::consts::TAU / FRAME_COUNT as f32);
        let cube_model = Mat4::from_translation(vec3(1.2, 0.0, 0.0))
            * Mat4::from_rotation_y(angle)
            * Mat4::from_rotation_x(angle * 0.5);
        let sphere_model = Mat4::from_translation(vec3(-1.2, 0.0, 0.0));
        let mode = if frame < FRAME_COUNT / 2 {
            ShadeMode::VertexColor
        } else {
            ShadeMode::DirectionalRamp
        };

        scene_tx
            .send(FrameParams {
                draws: vec![
                    DrawCall {
                        mesh: 0,
                        uniforms: DrawUniforms { model: cube_model, view, perspective },
                    },
                    DrawCall {
                        mesh: 1,
                        uniforms: DrawUniforms { model: sphere_model, view, perspective },
                    },
                ],
                mode,
                clear: vec4(0.8, 0.8, 1.0, 1.0),
            })
            .map_err(|_| anyhow::anyhow!("render worker exited"))?;

        to_worker_tx
            .send(std::mem::take(&mut buffer))
            .await
            .context("submitting framebuffer")?;
        let rendered = from_worker_rx
            .recv()
            .await
            .context("render worker closed")?;

        let path: PathBuf = Path::new(OUT_DIR).join(format!("frame_{frame:02}.ppm"));
        write_ppm(&path, &rendered)?;
        info!("wrote {} ({mode:?})", path.display());
        buffer = rendered;
    }

    Ok(())
}

fn write_ppm(path: &Path, pixels: &[u32]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write!(out, "P6\n{WIDTH} {HEIGHT}\n255\n")?;
    for px in pixels {
        out.write_all(&[(px >> 16) as u8, (px >> 8) as u8, *px as u8])?;
    }
    out.flush()?;
    Ok(())
}
