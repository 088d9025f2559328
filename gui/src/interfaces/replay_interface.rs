use flume::{Receiver, Sender};
use racereplay::interfaces::gui_interface::{PlaybackCommand, RaceState};
use tracing::warn;

#[derive(Debug)]
pub struct ReplayInterface {
    pub rx: Receiver<RaceState>,
    pub tx_cmd: Sender<PlaybackCommand>,
    pub race_state: RaceState,
}

impl ReplayInterface {
    pub fn update(&mut self) {
        // only the latest race state in the channel is of interest
        if let Some(race_state) = self.rx.try_iter().last() {
            self.race_state = race_state;
        }
    }

    pub fn send_command(&self, command: PlaybackCommand) {
        if self.tx_cmd.send(command).is_err() {
            warn!(?command, "Replay thread is not running anymore, command is dropped");
        }
    }
}
