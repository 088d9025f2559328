use std::fmt::Write;

/// CarAppearance is used to store how many frames a car was contained in during the replay.
#[derive(Debug, Clone, PartialEq)]
pub struct CarAppearance {
    pub car_no: u32,
    pub driver_initials: String,
    pub no_frames: usize,
}

/// ReplayResult contains all replay information that is required for post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub tot_no_frames: usize,
    pub no_frames_presented: usize,
    pub no_empty_frames: usize,
    pub car_appearances: Vec<CarAppearance>,
    pub cars_with_configuration_errors: Vec<u32>,
}

impl ReplayResult {
    pub fn get_summary(&self) -> String {
        let mut summary = String::new();

        writeln!(
            &mut summary,
            "frames presented: {}/{} ({} empty)",
            self.no_frames_presented, self.tot_no_frames, self.no_empty_frames
        )
        .unwrap();
        writeln!(&mut summary, "car, frames").unwrap();

        for car_appearance in self.car_appearances.iter() {
            writeln!(
                &mut summary,
                "{:3} ({}), {}",
                car_appearance.car_no, car_appearance.driver_initials, car_appearance.no_frames
            )
            .unwrap();
        }

        if !self.cars_with_configuration_errors.is_empty() {
            let car_nos: Vec<String> = self
                .cars_with_configuration_errors
                .iter()
                .map(|car_no| car_no.to_string())
                .collect();
            writeln!(
                &mut summary,
                "cars with configuration errors: {}",
                car_nos.join(", ")
            )
            .unwrap();
        }

        summary
    }

    /// print_summary prints the replay summary to the console output.
    pub fn print_summary(&self) {
        println!("RESULT: Replay summary");
        print!("{}", self.get_summary());
    }
}
