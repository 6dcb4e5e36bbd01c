//! Minimal viewer: a clear-color renderer driven by the window core.
//!
//! Demonstrates the full frame cycle: poll events, read input state, render,
//! swap. Escape requests a close; space cycles the clear color.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use vitrine::{InputState, InputTracker, Renderer, WindowConfig, WindowContext};

const COLORS: [(f32, f32, f32); 4] = [
    (0.10, 0.12, 0.16),
    (0.16, 0.10, 0.12),
    (0.10, 0.16, 0.12),
    (0.02, 0.02, 0.02),
];

struct ClearRenderer {
    color_index: usize,
}

impl ClearRenderer {
    fn new() -> Self {
        Self { color_index: 0 }
    }

    fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % COLORS.len();
    }
}

impl Renderer for ClearRenderer {
    fn render(&mut self) {
        let (r, g, b) = COLORS[self.color_index];
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = WindowConfig::load_or_default("viewer.toml");

    let mut window = WindowContext::new(config)?;
    window.load()?;

    let input = Rc::new(RefCell::new(InputTracker::new()));
    window.add_event_sink(input.clone());

    let renderer = Rc::new(RefCell::new(ClearRenderer::new()));
    window.set_renderer(renderer.clone());

    info!("viewer running; escape closes, space cycles the clear color");

    while !window.close_requested() {
        window.poll_events();

        {
            let input = input.borrow();
            if input.key_state(glfw::Key::Escape as i32) == InputState::Pressed {
                window.set_close_state(true);
            }
            if input.key_state(glfw::Key::Space as i32) == InputState::Pressed {
                renderer.borrow_mut().next_color();
            }
        }

        window.render();
    }

    Ok(())
}
