pub mod core;
pub mod interfaces;
pub mod post;
pub mod pre;


#[cfg(test)]
mod registry_tests {
    use crate::core::registry::{
        normalize_hex_code, parse_hex_color, ConfigurationError, EntityRegistry, DEFAULT_COLOR,
    };
    use crate::interfaces::gui_interface::RgbColor;
    use crate::pre::read_replay_pars::{DriverPars, ReplayPars};

    fn registry_with_orphan_driver() -> EntityRegistry {
        let mut replay_pars = ReplayPars::default();
        replay_pars.driver_pars_all.insert(
            50,
            DriverPars {
                initials: "NEW".to_owned(),
                team: "UNKNOWN".to_owned(),
            },
        );
        EntityRegistry::new(&replay_pars)
    }

    #[test]
    fn test_display_code_known() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        assert_eq!(registry.display_code_for(33), "VER");
        assert_eq!(registry.display_code_for(44), "HAM");
    }
    #[test]
    fn test_display_code_unknown() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        assert_eq!(registry.display_code_for(999), "999");
        assert_eq!(registry.display_code_for(0), "0");
    }
    #[test]
    fn test_color_known() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let color = registry.color_for(33).unwrap();
        assert_eq!(
            color,
            RgbColor {
                r: 0x1E,
                g: 0x1E,
                b: 0x5F
            }
        );
        // pure function of the tables
        assert_eq!(registry.color_for(33).unwrap(), color);
        assert_eq!(registry.color_for(10).unwrap(), color);
    }
    #[test]
    fn test_color_unknown_car_gives_default() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        assert_eq!(registry.color_for(999), Ok(DEFAULT_COLOR));
    }
    #[test]
    fn test_color_missing_team() {
        let registry = registry_with_orphan_driver();
        assert_eq!(
            registry.color_for(50),
            Err(ConfigurationError::MissingTeamColor {
                car_no: 50,
                team: "UNKNOWN".to_owned()
            })
        );
        assert_eq!(registry.display_code_for(50), "NEW");
    }
    #[test]
    fn test_normalize_hex_code() {
        assert_eq!(normalize_hex_code("D40000"), "#D40000");
        assert_eq!(normalize_hex_code("#D40000"), "#D40000");
        assert_eq!(normalize_hex_code(" 005AA7 "), "#005AA7");
    }
    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("D40000"),
            RgbColor {
                r: 0xD4,
                g: 0x00,
                b: 0x00
            }
        );
        assert_eq!(parse_hex_color("#ff6a13").to_string(), "#FF6A13");
    }
    #[test]
    fn test_parse_invalid_hex_color_gives_default() {
        assert_eq!(parse_hex_color("XYZXYZ"), DEFAULT_COLOR);
        assert_eq!(parse_hex_color(""), DEFAULT_COLOR);
        assert_eq!(DEFAULT_COLOR.to_string(), "#FFFFFF");
    }
}


#[cfg(test)]
mod handle_replay_tests {
    use crate::core::frame::{Frame, FrameSequence, Position};
    use crate::core::handle_replay::{handle_replay, ReplayPresenter};
    use crate::core::registry::{EntityRegistry, DEFAULT_COLOR};
    use crate::core::scheduler::FrameSink;
    use crate::interfaces::gui_interface::PlaybackCommand;
    use crate::pre::read_replay_pars::{DriverPars, ReplayPars};
    use helpers::general::InputValueError;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn frame(car_nos: &[u32]) -> Frame {
        let mut car_positions = HashMap::new();
        for &car_no in car_nos {
            car_positions.insert(car_no, Position::new(car_no as f64, 0.0, 0.0));
        }
        Frame {
            time_delta: String::new(),
            car_positions,
        }
    }

    #[test]
    fn test_presenter_resolves_unknown_cars() {
        let mut replay_pars = ReplayPars::default();
        replay_pars.driver_pars_all.insert(
            50,
            DriverPars {
                initials: "NEW".to_owned(),
                team: "UNKNOWN".to_owned(),
            },
        );
        let registry = EntityRegistry::new(&replay_pars);
        let mut presenter = ReplayPresenter::new(&registry);

        presenter.present_frame(0, &frame(&[999, 33, 50]));
        let (frame_idx, car_states) = presenter.take_latest_frame().unwrap();
        assert_eq!(frame_idx, 0);
        assert!(presenter.take_latest_frame().is_none());

        let car_nos: Vec<u32> = car_states.iter().map(|c| c.car_no).collect();
        assert_eq!(car_nos, vec![33, 50, 999]);
        assert_eq!(car_states[0].driver_initials, "VER");
        assert_eq!(car_states[1].color, DEFAULT_COLOR);
        assert_eq!(car_states[2].driver_initials, "999");
        assert_eq!(car_states[2].color, DEFAULT_COLOR);
    }
    #[test]
    fn test_presenter_counts_appearances() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let mut presenter = ReplayPresenter::new(&registry);

        presenter.present_frame(0, &frame(&[33, 44]));
        presenter.present_frame(1, &frame(&[]));
        presenter.present_frame(2, &frame(&[44]));

        let replay_result = presenter.get_replay_result(3);
        assert_eq!(replay_result.no_frames_presented, 3);
        assert_eq!(replay_result.no_empty_frames, 1);
        assert_eq!(replay_result.car_appearances.len(), 2);
        assert_eq!(replay_result.car_appearances[0].car_no, 33);
        assert_eq!(replay_result.car_appearances[0].no_frames, 1);
        assert_eq!(replay_result.car_appearances[1].driver_initials, "HAM");
        assert_eq!(replay_result.car_appearances[1].no_frames, 2);
        assert!(replay_result.get_summary().contains("frames presented: 3/3 (1 empty)"));
    }
    #[test]
    fn test_handle_replay_headless() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let frames = Arc::new(FrameSequence::new(vec![
            frame(&[33]),
            frame(&[]),
            frame(&[33, 44]),
        ]));

        let replay_result = handle_replay(frames, &registry, 0.001, 1000.0, None, None).unwrap();
        assert_eq!(replay_result.tot_no_frames, 3);
        assert_eq!(replay_result.no_frames_presented, 3);
        assert_eq!(replay_result.car_appearances[0].no_frames, 2);
    }
    #[test]
    fn test_handle_replay_empty_data() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let replay_result = handle_replay(
            Arc::new(FrameSequence::default()),
            &registry,
            0.1,
            100.0,
            None,
            None,
        )
        .unwrap();
        assert_eq!(replay_result.no_frames_presented, 0);
    }
    #[test]
    fn test_handle_replay_rejects_invalid_timing() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let frames = Arc::new(FrameSequence::new(vec![frame(&[33])]));

        for &(frame_delay, tick_rate) in [
            (0.1, 0.0),
            (0.1, -60.0),
            (0.1, f64::NAN),
            (0.0, 60.0),
            (-0.1, 60.0),
            (f64::INFINITY, 60.0),
        ]
        .iter()
        {
            let err = handle_replay(
                Arc::clone(&frames),
                &registry,
                frame_delay,
                tick_rate,
                None,
                None,
            )
            .unwrap_err();
            assert!(err.downcast_ref::<InputValueError>().is_some());
        }
    }
    #[test]
    fn test_presenter_reports_configuration_error_once() {
        let mut replay_pars = ReplayPars::default();
        replay_pars.driver_pars_all.insert(
            50,
            DriverPars {
                initials: "NEW".to_owned(),
                team: "UNKNOWN".to_owned(),
            },
        );
        let registry = EntityRegistry::new(&replay_pars);
        let mut presenter = ReplayPresenter::new(&registry);

        for frame_idx in 0..3 {
            presenter.present_frame(frame_idx, &frame(&[33, 50]));
            let (_, car_states) = presenter.take_latest_frame().unwrap();
            assert_eq!(car_states[1].car_no, 50);
            assert_eq!(car_states[1].driver_initials, "NEW");
            assert_eq!(car_states[1].color, DEFAULT_COLOR);
            assert_ne!(car_states[0].color, DEFAULT_COLOR);
        }

        let replay_result = presenter.get_replay_result(3);
        assert_eq!(replay_result.cars_with_configuration_errors, vec![50]);
        assert_eq!(replay_result.car_appearances[1].no_frames, 3);
        assert!(replay_result
            .get_summary()
            .contains("cars with configuration errors: 50"));
    }
    #[test]
    fn test_handle_replay_quits_on_command() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let frames = Arc::new(FrameSequence::new(vec![frame(&[33]); 100]));
        let (tx, rx) = flume::unbounded();
        let (tx_cmd, rx_cmd) = flume::unbounded();
        tx_cmd.send(PlaybackCommand::Quit).unwrap();

        let replay_result =
            handle_replay(frames, &registry, 1.0, 100.0, Some(&tx), Some(&rx_cmd)).unwrap();
        assert_eq!(replay_result.no_frames_presented, 0);
        assert!(rx.try_recv().is_err());
    }
    #[test]
    fn test_handle_replay_ends_on_disconnect() {
        let registry = EntityRegistry::new(&ReplayPars::default());
        let frames = Arc::new(FrameSequence::new(vec![frame(&[33]); 100]));
        let (tx, _rx) = flume::unbounded();
        let (tx_cmd, rx_cmd) = flume::unbounded::<PlaybackCommand>();
        drop(tx_cmd);

        let replay_result =
            handle_replay(frames, &registry, 1.0, 100.0, Some(&tx), Some(&rx_cmd)).unwrap();
        assert_eq!(replay_result.no_frames_presented, 0);
    }
}
