//! Fixed size window displaying a pile canvas.
use anyhow::anyhow;
use image::RgbaImage;
use std::{num::NonZeroU32, rc::Rc};
use tracing::debug;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

/// Show `canvas` in a non-resizable window titled `title`.
///
/// Blocks until the window is closed.
pub fn show(canvas: &RgbaImage, title: &str) -> anyhow::Result<()> {
    let (width, height) = canvas.dimensions();
    let mut app = Preview {
        title,
        width,
        height,
        pixels: canvas
            .pixels()
            .map(|p| {
                let [r, g, b, _] = p.0;
                u32::from_be_bytes([0, r, g, b])
            })
            .collect(),
        window: None,
        error: None,
    };

    let event_loop = EventLoop::new().map_err(|e| anyhow!("preview event loop: {e}"))?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("preview event loop: {e}"))?;

    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Preview<'a> {
    title: &'a str,
    width: u32,
    height: u32,
    /// 0RGB
    pixels: Vec<u32>,
    window: Option<(Rc<Window>, Surface)>,
    error: Option<anyhow::Error>,
}

impl Preview<'_> {
    fn open(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<(Rc<Window>, Surface)> {
        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_resizable(false);
        let window = event_loop
            .create_window(attributes)
            .map_err(|e| anyhow!("preview window: {e}"))?;
        let window = Rc::new(window);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("preview context: {e}"))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("preview surface: {e}"))?;
        Ok((window, surface))
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let Some((window, surface)) = &mut self.window else {
            return Ok(());
        };
        // hidpi scaling may not give the exact requested size
        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        surface
            .resize(w, h)
            .map_err(|e| anyhow!("preview resize: {e}"))?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow!("preview buffer: {e}"))?;
        buffer.fill(0);

        let copy_w = size.width.min(self.width) as usize;
        for y in 0..size.height.min(self.height) as usize {
            let src = y * self.width as usize;
            let dst = y * size.width as usize;
            buffer[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }

        buffer
            .present()
            .map_err(|e| anyhow!("preview present: {e}"))?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Preview<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(window) => {
                debug!(width = self.width, height = self.height, "opened preview");
                window.0.request_redraw();
                self.window = Some(window);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.draw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}
