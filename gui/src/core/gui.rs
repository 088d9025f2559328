use crate::core::track::Track;
use crate::interfaces::replay_interface::ReplayInterface;
use eframe::{egui, epi};
use flume::{Receiver, Sender};
use helpers::buffer::RingBuffer;
use racereplay::core::frame::FrameSequence;
use racereplay::interfaces::gui_interface::{PlaybackCommand, RaceState};
use std::fmt::Write;
use std::time::Instant;

#[derive(Debug)]
pub struct CarStateGui {
    pub color: egui::Color32,
    pub pos: egui::Pos2,
    pub text_pos: egui::Pos2,
    pub text: String,
}

#[derive(Debug)]
pub struct RacePlot {
    pub replay_interface: ReplayInterface,
    pub track: Track,
    pub racing_line: Vec<egui::Pos2>,
    pub prev_update: Instant,
    pub prev_update_durations: RingBuffer<u32>,
}

impl RacePlot {
    pub fn new(
        rx: Receiver<RaceState>,
        tx_cmd: Sender<PlaybackCommand>,
        frames: &FrameSequence,
    ) -> RacePlot {
        // set up interface
        let replay_interface = ReplayInterface {
            rx,
            tx_cmd,
            race_state: RaceState {
                tot_no_frames: frames.len(),
                ..Default::default()
            },
        };

        // derive track from the replayed data
        let track = Track::from_frames(frames);

        // racing line is saved separately such that this must not be repeated in each call
        let racing_line = track
            .racing_line
            .iter()
            .map(|coords| egui::Pos2 {
                x: coords.x as f32,
                y: coords.y as f32,
            })
            .collect();

        RacePlot {
            replay_interface,
            track,
            racing_line,
            prev_update: Instant::now(),
            prev_update_durations: RingBuffer::new(10),
        }
    }

    fn set_controls(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Start").clicked() {
                self.replay_interface.send_command(PlaybackCommand::Start);
            }
            if ui.button("Stop").clicked() {
                self.replay_interface.send_command(PlaybackCommand::Stop);
            }
            if ui.button("Reset").clicked() {
                self.replay_interface.send_command(PlaybackCommand::Reset);
            }
        });
    }

    pub fn set_ui_content(&mut self, ui: &mut egui::Ui) -> egui::Response {
        // PREPARATIONS ----------------------------------------------------------------------------
        // get UI handles
        let (response, painter) =
            ui.allocate_painter(ui.available_size_before_wrap_finite(), egui::Sense::drag());

        // get transformation from x/y to pixels in the window (y axis must be inverted)
        let padding_size = self
            .track
            .bounds
            .map(|[x_min, x_max, y_min, y_max]| 0.05 * (x_max - x_min).max(y_max - y_min))
            .unwrap_or(1.0);
        let [x_min, x_max, y_min, y_max] = self.track.get_axes_expansion(padding_size);

        let to_screen = egui::emath::RectTransform::from_to(
            egui::emath::Rect::from_min_max(
                egui::Pos2 {
                    x: x_min as f32,
                    y: y_max as f32,
                },
                egui::Pos2 {
                    x: x_max as f32,
                    y: y_min as f32,
                },
            ),
            response.rect,
        );

        // create vector for drawn shapes
        let mut shapes = vec![];

        // TRACK DRAWING ---------------------------------------------------------------------------
        if self.racing_line.len() > 1 {
            shapes.push(egui::Shape::line(
                self.racing_line.iter().map(|p| to_screen * *p).collect(),
                egui::Stroke::new(3.0, egui::Color32::from_gray(90)),
            ));
        }

        // CARS DRAWING ----------------------------------------------------------------------------
        // labels are shifted upwards (in pixels) such that they do not cover the car
        let text_offset = egui::Vec2 { x: 0.0, y: -16.0 };
        let car_states_gui: Vec<CarStateGui> = self
            .replay_interface
            .race_state
            .car_states
            .iter()
            .filter(|car_state| car_state.pos.is_finite())
            .map(|car_state| {
                let pos = to_screen
                    * egui::Pos2 {
                        x: car_state.pos.x as f32,
                        y: car_state.pos.y as f32,
                    };
                CarStateGui {
                    color: egui::Color32::from_rgb(
                        car_state.color.r,
                        car_state.color.g,
                        car_state.color.b,
                    ),
                    pos,
                    text_pos: pos + text_offset,
                    text: format!("{} ({})", car_state.car_no, car_state.driver_initials),
                }
            })
            .collect();

        // add car points
        for car_state_gui in car_states_gui.iter() {
            shapes.push(egui::Shape::circle_filled(
                car_state_gui.pos,
                7.0,
                car_state_gui.color,
            ));

            shapes.push(egui::Shape::text(
                ui.fonts(),
                car_state_gui.text_pos,
                egui::Align2::CENTER_CENTER,
                &car_state_gui.text,
                egui::TextStyle::Body,
                car_state_gui.color,
            ));
        }

        // UPDATE GENERAL INFORMATION TEXT IN GUI --------------------------------------------------
        let race_state = &self.replay_interface.race_state;
        let mut gen_info_text = format!(
            "Frame: {}/{}\n",
            race_state.cur_frame, race_state.tot_no_frames
        );

        // add playback state
        writeln!(
            &mut gen_info_text,
            "Playback state: {:?}",
            race_state.playback_state
        )
        .unwrap();

        // calculate current UI update duration, append it to the buffer, and set update time
        self.prev_update_durations
            .push(self.prev_update.elapsed().as_millis() as u32);
        self.prev_update = Instant::now();

        // add update frequency
        if let Some(avg_duration) = self.prev_update_durations.get_avg() {
            if avg_duration > 0.0 {
                write!(
                    &mut gen_info_text,
                    "GUI update frequency: {:.0} Hz",
                    1000.0 / avg_duration
                )
                .unwrap();
            }
        }

        // show general informations text in the GUI
        shapes.push(egui::Shape::text(
            ui.fonts(),
            to_screen
                * egui::Pos2 {
                    x: x_min as f32,
                    y: y_max as f32,
                },
            egui::Align2::LEFT_TOP,
            &gen_info_text,
            egui::TextStyle::Body,
            egui::Color32::WHITE,
        ));

        // DRAWING ---------------------------------------------------------------------------------
        // update shapes in UI painter and return response
        painter.extend(shapes);
        response
    }
}

impl epi::App for RacePlot {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::CtxRef, _frame: &mut epi::Frame) {
        // update replay interface
        self.replay_interface.update();

        // update UI content
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.set_controls(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                self.set_ui_content(ui);
            });
        });

        // request repaint of the UI
        ctx.request_repaint();
    }

    fn on_exit(&mut self) {
        self.replay_interface.send_command(PlaybackCommand::Quit);
    }

    fn name(&self) -> &str {
        "Race Replay"
    }
}
