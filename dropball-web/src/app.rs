use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use dropball_wgpu::wgpu;
use dropball_wgpu::{DrawMesh, FrameDesc, LineBatch, MeshHandle, Renderer};

use crate::config::DemoConfig;
use crate::demo::Demo;
use crate::input::InputState;
use crate::scene::MeshId;
use crate::transform;

/// Main application state for the WASM runtime.
#[wasm_bindgen]
pub struct App {
    demo: Demo,
    renderer: Renderer,
    mesh_handles: Vec<(MeshId, MeshHandle)>,
    input: InputState,
    last_time: f64,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl App {
    /// Run one frame. Called from requestAnimationFrame with its timestamp.
    pub fn frame(&mut self, time: f64) -> Result<(), JsValue> {
        let dt = ((time - self.last_time) / 1000.0).max(0.0);
        self.last_time = time;

        self.demo.scene_mut().camera.apply_input(&self.input);
        self.input.update();

        let report = self.demo.tick(dt as f32);
        if report.reset {
            log::debug!("Sphere reset");
        }
        transform::compute_world_matrices(self.demo.scene_mut());

        self.render().map_err(|e| JsValue::from_str(&e))
    }

    /// Match the canvas to its displayed size. Only pixel dimensions change.
    pub fn resize(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = canvas_pixel_size(&window, &self.canvas);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.demo.resize(width, height);
        self.renderer.resize(width, height);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.input.press(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input.move_to(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.input.release();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.input.scroll(delta_y);
    }

    /// Get the canvas width.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Get the canvas height.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

impl App {
    /// Build the demo and attach a renderer to the canvas.
    pub(crate) async fn new(canvas_id: &str, config: DemoConfig) -> Result<App, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas")?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut demo = Demo::new(config).map_err(|e| JsValue::from_str(&e))?;
        demo.resize(width, height);

        let mut renderer = Renderer::new(
            wgpu::SurfaceTarget::Canvas(canvas.clone()),
            width,
            height,
            demo.config().light.shadow_map_size,
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create renderer: {e}")))?;

        let mesh_handles = demo
            .scene()
            .meshes()
            .map(|(id, mesh)| (id, renderer.upload_mesh(&mesh.geometry)))
            .collect();

        let last_time = window.performance().map(|p| p.now()).unwrap_or(0.0);

        log::info!("Dropball app started on #{canvas_id} ({width}x{height})");

        Ok(App {
            demo,
            renderer,
            mesh_handles,
            input: InputState::new(),
            last_time,
            canvas,
        })
    }

    fn render(&mut self) -> Result<(), String> {
        let scene = self.demo.scene();
        let camera = &scene.camera;

        let draws: Vec<DrawMesh> = self
            .mesh_handles
            .iter()
            .map(|&(id, handle)| {
                let mesh = scene.mesh(id);
                let [r, g, b] = mesh.material.diffuse_color;
                DrawMesh {
                    mesh: handle,
                    model: mesh.world_matrix,
                    color: [r, g, b, mesh.material.alpha],
                    specular_power: mesh.material.specular_power,
                    cast_shadows: scene.shadow_generator.is_caster(id),
                    receive_shadows: mesh.receive_shadows,
                }
            })
            .collect();

        let lines = self.demo.debug_drawer().line_system().map(|system| LineBatch {
            vertices: system.vertices(),
            version: system.version(),
        });

        let [r, g, b, a] = scene.clear_color;
        let frame = FrameDesc {
            view_proj: camera.view_projection(scene.viewport().aspect()),
            camera_position: camera.position(),
            light_direction: scene.light.direction,
            light_intensity: scene.light.intensity,
            light_view_proj: scene
                .shadow_generator
                .light_view_proj(&scene.light, camera.target),
            clear_color: [r as f64, g as f64, b as f64, a as f64],
            meshes: &draws,
            lines,
        };
        self.renderer.render(&frame)
    }
}

fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let ratio = window.device_pixel_ratio();
    let width = (canvas.client_width() as f64 * ratio).round().max(1.0) as u32;
    let height = (canvas.client_height() as f64 * ratio).round().max(1.0) as u32;
    (width, height)
}
