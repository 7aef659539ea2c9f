/// Terminal front-end: owns the camera state, polls input and draws lit solids
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use lumen_core::{CameraState, Frame, Mesh, ProjectionMode, SceneConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod input;
pub mod renderer;

pub use input::Action;
pub use renderer::AsciiRenderer;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    scene: SceneConfig,
    camera: CameraState,
    mode: ProjectionMode,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, scene: SceneConfig, mode: ProjectionMode) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let (width, height) = input::viewport(columns, rows);

        Ok(Self {
            mesh,
            scene,
            camera: CameraState::new(width, height),
            mode,
            renderer: AsciiRenderer::new(columns as usize, rows as usize),
            frame_time: Duration::from_millis(1000 / 30),
            running: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Target frames per second; zero is treated as one
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.frame_time = Duration::from_millis(1000 / u64::from(fps.max(1)));
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.started = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle every pending input event before computing the frame
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }
            if !self.running {
                break;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        log::info!("render loop stopped after {:.1}s", self.started.elapsed().as_secs_f32());
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let event = event::read()?;
        if let event::Event::Resize(columns, rows) = event {
            self.renderer.resize(columns as usize, rows as usize);
        }
        if input::apply(&event, &mut self.camera, &mut self.mode) == Action::Quit {
            self.running = false;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let time = self.started.elapsed().as_secs_f32();
        let frame = Frame::compute(&self.scene, &self.camera, self.mode, time);
        let lights = frame.lights(&self.scene);

        // Clear renderer
        self.renderer.clear();

        for instance in frame.instances(&self.scene) {
            self.renderer
                .render_instance(&self.mesh, &instance, &frame.projection, &lights);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let [x, y] = self.camera.location();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Lumen | FPS: {:.1} | {:?} | scale {:.0} | pan ({:.2}, {:.2}) | Arrows/drag=Pan Wheel=Zoom P=Projection Q=Quit",
                self.fps,
                self.mode,
                self.camera.scale(),
                x,
                y
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
