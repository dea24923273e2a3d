// ui.rs - egui front end: turns key presses into commands and draws snapshots

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Stroke, Vec2};

use crate::patterns::PATTERNS;
use crate::session::{Command, Flow, Mode, Pacer, SessionController, Snapshot};

// Frame delay while idle in edit mode
const IDLE_FRAME: Duration = Duration::from_millis(16);

const CURSOR_LIVE: char = '•';
const CURSOR_DEAD: char = '▒';

/// Named keys: arrows only, everything else arrives as text.
pub fn command_for_key(key: egui::Key) -> Option<Command> {
    match key {
        egui::Key::ArrowUp => Some(Command::Up),
        egui::Key::ArrowDown => Some(Command::Down),
        egui::Key::ArrowLeft => Some(Command::Left),
        egui::Key::ArrowRight => Some(Command::Right),
        _ => None,
    }
}

/// Typed characters, case sensitive (`S`ave and `L`oad need shift).
pub fn command_for_char(ch: char) -> Option<Command> {
    let command = match ch {
        'k' => Command::Up,
        'j' => Command::Down,
        'h' => Command::Left,
        'l' => Command::Right,
        ' ' => Command::Toggle,
        'p' => Command::PlayPause,
        'g' => Command::Step,
        'r' => Command::Randomize,
        'S' => Command::Save,
        'L' => Command::Load,
        '+' => Command::SpeedUp,
        '-' => Command::SlowDown,
        'q' => Command::Quit,
        '1'..='9' => {
            let index = ch as usize - '1' as usize;
            if index >= PATTERNS.len() {
                return None;
            }
            Command::Stamp(index)
        }
        _ => return None,
    };
    Some(command)
}

pub struct LifeApp {
    session: SessionController,
    pacer: Pacer,
    pending: VecDeque<Command>,
    cell_char: char,
    live_color: Color32,
    dead_color: Color32,
}

impl LifeApp {
    pub fn new(session: SessionController, cell_char: char) -> Self {
        Self {
            session,
            pacer: Pacer::default(),
            pending: VecDeque::new(),
            cell_char,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }

    fn queue_input(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            for event in &input.events {
                match event {
                    egui::Event::Key { key, pressed: true, .. } => {
                        self.pending.extend(command_for_key(*key));
                    }
                    egui::Event::Text(text) => {
                        self.pending.extend(text.chars().filter_map(command_for_char));
                    }
                    _ => {}
                }
            }
        });
    }

    fn draw_grid(&self, ui: &mut egui::Ui, view: &Snapshot<'_>) {
        let rows = view.size.rows() as f32;
        let cols = view.size.cols() as f32;
        let avail = ui.available_size();
        let cell = (avail.x / cols).min(avail.y / rows).floor().max(2.0);

        let total_size = Vec2::new(cell * cols, cell * rows);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, self.dead_color);

        let cell_rect = |row: i32, col: i32| {
            Rect::from_min_size(
                origin + Vec2::new(col as f32 * cell, row as f32 * cell),
                Vec2::splat(cell),
            )
        };
        let font = FontId::monospace(cell * 0.9);

        for c in view.live {
            painter.text(
                cell_rect(c.row, c.col).center(),
                Align2::CENTER_CENTER,
                self.cell_char,
                font.clone(),
                self.live_color,
            );
        }

        // Cursor is only shown while editing
        if view.mode == Mode::Edit {
            let rect = cell_rect(view.cursor.row, view.cursor.col);
            if view.cursor_alive() {
                painter.rect_filled(rect, 1.0, self.live_color);
                painter.text(rect.center(), Align2::CENTER_CENTER, CURSOR_LIVE, font, self.dead_color);
            } else {
                painter.text(rect.center(), Align2::CENTER_CENTER, CURSOR_DEAD, font, Color32::GRAY);
            }
            painter.rect_stroke(rect, 1.0, Stroke::new(0.5, Color32::from_gray(160)));
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.queue_input(ctx);

        // At most one command per control cycle
        let now = Instant::now();
        let tick = self.session.tick_interval();
        if self.pacer.ready(self.session.mode(), tick, now) {
            let command = self.pending.pop_front();
            if self.session.cycle(command) == Flow::Quit {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let view = self.session.snapshot();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.monospace(view.status_line());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| self.draw_grid(ui, &view));

        match view.mode {
            Mode::Running => ctx.request_repaint_after(self.pacer.remaining(tick, Instant::now())),
            Mode::Edit if !self.pending.is_empty() => ctx.request_repaint(),
            Mode::Edit => ctx.request_repaint_after(IDLE_FRAME),
        }
    }
}
