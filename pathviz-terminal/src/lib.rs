/// Terminal host for pathviz scenes: frame loop, debug panel keys, overlay
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use nalgebra::Point3;
use pathviz_core::{Camera, Knob, Motion, Orbit, ProjectionMode, Scene, Transform};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod renderer;

pub use renderer::{PointRenderer, PALETTE};

const ORBIT_STEP: f32 = 0.1;

/// Interactive terminal view of one scene
pub struct TerminalApp {
    scene: Scene,
    orbit: Orbit,
    camera: Camera,
    renderer: PointRenderer,
    positions: Vec<Point3<f32>>,
    selected: Knob,
    status: String,
    running: bool,
    paused: bool,
    started: Instant,
    /// Animation time, frozen while paused
    elapsed: f64,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, width, height))
    }

    pub fn with_size(scene: Scene, width: u16, height: u16) -> Self {
        let renderer = PointRenderer::new(width as usize, height as usize);
        let now = Instant::now();

        Self {
            scene,
            orbit: Orbit::zero(),
            camera: Camera::new(renderer.aspect()),
            renderer,
            positions: Vec::new(),
            selected: Knob::Speed,
            status: String::new(),
            running: true,
            paused: false,
            started: now,
            elapsed: 0.0,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!(motion = ?self.scene.motion(), particles = self.scene.grid().len(), "terminal view started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        info!(
            seconds = self.started.elapsed().as_secs_f32(),
            "terminal view closed"
        );

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update(frame_start);
            self.render()?;

            self.frame_count += 1;
            let spent = frame_start.elapsed();
            if spent < target_frame_time {
                std::thread::sleep(target_frame_time - spent);
            }

            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.renderer.resize(width as usize, height as usize);
                self.camera.aspect = self.renderer.aspect();
            }
            _ => {}
        }
    }

    /// Apply one key press; public so hosts and tests can script the panel
    pub fn handle_key(&mut self, KeyEvent { code, modifiers, .. }: KeyEvent) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.orbit.rotate(ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.orbit.rotate(-ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.orbit.rotate(0.0, -ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orbit.rotate(0.0, ORBIT_STEP, 0.0),
            KeyCode::Char('e') => self.orbit.rotate(0.0, 0.0, ORBIT_STEP),
            KeyCode::Char('r') => self.orbit.rotate(0.0, 0.0, -ORBIT_STEP),
            KeyCode::Char('p') => {
                self.camera.mode = match self.camera.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
            }
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::BackTab => self.selected = self.selected.previous(),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                self.selected = self.selected.previous()
            }
            KeyCode::Tab => self.selected = self.selected.next(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge(1),
            KeyCode::Char('-') | KeyCode::Char('_') => self.nudge(-1),
            KeyCode::Char('g') => self.regenerate(),
            _ => {}
        }
    }

    fn nudge(&mut self, steps: i32) {
        let value = self.scene.style.nudge(self.selected, steps);
        debug!(knob = self.selected.label(), value, "knob changed");
        self.status = if self.selected.needs_regenerate() {
            format!("{} = {} (press g to regenerate)", self.selected.label(), value)
        } else {
            format!("{} = {}", self.selected.label(), value)
        };
    }

    fn regenerate(&mut self) {
        match self.scene.regenerate() {
            Ok(()) => {
                info!(
                    rows = self.scene.grid().rows(),
                    cols = self.scene.grid().cols(),
                    "regenerated particles"
                );
                self.status = format!("{} particles", self.scene.grid().len());
            }
            Err(e) => {
                warn!(error = %e, "regenerate failed");
                self.status = e.to_string();
            }
        }
    }

    fn update(&mut self, now: Instant) {
        let delta = (now - self.last_tick).as_secs_f64();
        self.last_tick = now;
        if !self.paused {
            self.elapsed += delta;
        }
        self.scene.positions(self.elapsed, &mut self.positions);
    }

    fn render(&mut self) -> io::Result<()> {
        let path = *self.scene.path();
        let model = Transform::orbit_about(&path.midpoint(), &self.orbit);
        let mvp = self.camera.mvp(&model);

        self.renderer.clear();
        self.renderer.render_path(&path, &mvp);

        let grid = self.scene.grid();
        self.renderer.render_points(&self.positions, &mvp, |i| {
            PALETTE[grid.color_index(i, PALETTE.len())]
        });

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;
        self.draw_overlay(&mut stdout)?;
        stdout.flush()
    }

    fn draw_overlay<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let title = match self.scene.motion() {
            Motion::Helix => "pathviz helix",
            Motion::Wobble => "pathviz wobble",
        };
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | FPS: {:.1} | {} particles{}",
                title,
                self.fps,
                self.scene.grid().len(),
                if self.paused { " | paused" } else { "" }
            )),
            terminal::Clear(ClearType::UntilNewLine),
            cursor::MoveTo(0, 1),
            Print(format!(
                "[{}] {:.2}  {}",
                self.selected.label(),
                self.scene.style.knob(self.selected),
                self.status
            )),
            terminal::Clear(ClearType::UntilNewLine),
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::DarkGrey),
            Print("WASD/arrows orbit  E/R roll  P projection  Tab knob  +/- adjust  G regenerate  Space pause  Q quit"),
            terminal::Clear(ClearType::UntilNewLine),
            ResetColor
        )
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Preset;

    fn app() -> TerminalApp {
        TerminalApp::with_size(Scene::from_preset(Preset::Bulbs).unwrap(), 120, 40)
    }

    fn press(app: &mut TerminalApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_knob_keys_edit_style() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selected, Knob::CurvePeriod);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.scene().style.curve_period, 3.0);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Char('-'));
        assert!((app.scene().style.curve_magnitude - 0.39).abs() < 1e-5);
    }

    #[test]
    fn test_regenerate_key_rebuilds_grid() {
        let mut app = app();
        app.selected = Knob::Rings;
        for _ in 0..70 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.scene().grid().len(), 3200);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.scene().grid().len(), 40 * 10);
    }

    #[test]
    fn test_time_keeps_advancing_after_days() {
        let mut app = app();
        app.elapsed = 5.0 * 24.0 * 3600.0;
        let before = app.elapsed;
        let start = app.last_tick;
        app.update(start + Duration::from_millis(33));
        assert!(app.elapsed - before > 0.03);
    }

    #[test]
    fn test_quit_and_pause() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        let start = app.last_tick;
        app.update(start + Duration::from_millis(500));
        assert_eq!(app.elapsed, 0.0);
        assert_eq!(app.positions.len(), 3200);

        press(&mut app, KeyCode::Char(' '));
        app.update(start + Duration::from_millis(750));
        assert!(app.elapsed > 0.2);

        press(&mut app, KeyCode::Esc);
        assert!(!app.is_running());
    }
}
