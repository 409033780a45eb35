mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use embassy_time::{Duration, Instant};
    use sparkle_matrix_composer::bounds::MatrixBounds;
    use sparkle_matrix_composer::engine::AnimationEngine;
    use sparkle_matrix_composer::main_loop::{MainLoop, RETRY_BACKOFF};
    use sparkle_matrix_composer::poller::SettingsPoller;
    use sparkle_matrix_composer::settings::Settings;
    use sparkle_matrix_composer::{
        DisplayError, DisplaySink, JoinError, NetworkAssociation, Rgb, SettingsFetcher,
        TransportError,
    };

    const BOUNDS: MatrixBounds = MatrixBounds {
        width: 16,
        height: 16,
    };

    type Loop = MainLoop<FakeSink, NoFetcher, FakeNet, 256, 64, 8>;

    struct NoFetcher;

    impl SettingsFetcher for NoFetcher {
        fn fetch(&mut self, _buf: &mut [u8]) -> Result<usize, TransportError> {
            Err(TransportError::ConnectionFailed)
        }
    }

    struct FakeNet;

    impl NetworkAssociation for FakeNet {
        fn is_connected(&self) -> bool {
            true
        }

        fn connect(&mut self) -> Result<(), JoinError> {
            Ok(())
        }
    }

    struct FakeSink {
        fail_remaining: usize,
        frames: Rc<Cell<usize>>,
        last_len: Rc<Cell<usize>>,
    }

    impl DisplaySink for FakeSink {
        fn render(&mut self, frame: &[Rgb]) -> Result<(), DisplayError> {
            if self.fail_remaining > 0 {
                self.fail_remaining -= 1;
                return Err(DisplayError);
            }
            self.frames.set(self.frames.get() + 1);
            self.last_len.set(frame.len());
            Ok(())
        }
    }

    fn ms(t: u64) -> Instant {
        Instant::from_millis(t)
    }

    fn main_loop(fail_first: usize) -> (Loop, Rc<Cell<usize>>) {
        let settings = Settings::from_json(br#"{"frame_rate":10}"#).unwrap();
        let poller =
            SettingsPoller::with_interval(NoFetcher, FakeNet, Duration::from_secs(3600));
        let engine = AnimationEngine::new(poller, BOUNDS, settings, 7);
        let frames = Rc::new(Cell::new(0));
        let sink = FakeSink {
            fail_remaining: fail_first,
            frames: frames.clone(),
            last_len: Rc::new(Cell::new(0)),
        };
        (MainLoop::new(engine, sink), frames)
    }

    #[test]
    fn test_committed_frame_sleeps_one_interval() {
        let (mut main_loop, frames) = main_loop(0);

        let result = main_loop.tick(ms(100));
        assert!(result.rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(100));
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn test_early_tick_sleeps_remainder() {
        let (mut main_loop, frames) = main_loop(0);

        let result = main_loop.tick(ms(60));
        assert!(!result.rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(40));
        assert_eq!(frames.get(), 0);
    }

    #[test]
    fn test_display_fault_backs_off_then_recovers() {
        let (mut main_loop, frames) = main_loop(1);

        let result = main_loop.tick(ms(100));
        assert!(!result.rendered);
        assert_eq!(result.sleep_duration, RETRY_BACKOFF);
        assert_eq!(frames.get(), 0);

        // The loop keeps going: the next due frame renders normally
        let result = main_loop.tick(ms(1100));
        assert!(result.rendered);
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn test_frame_matches_matrix_area() {
        let settings = Settings::from_json(br#"{"frame_rate":10}"#).unwrap();
        let poller =
            SettingsPoller::with_interval(NoFetcher, FakeNet, Duration::from_secs(3600));
        let engine: AnimationEngine<NoFetcher, FakeNet, 256, 64, 8> =
            AnimationEngine::new(poller, BOUNDS, settings, 7);
        let last_len = Rc::new(Cell::new(0));
        let sink = FakeSink {
            fail_remaining: 0,
            frames: Rc::new(Cell::new(0)),
            last_len: last_len.clone(),
        };
        let mut main_loop = MainLoop::new(engine, sink);

        assert!(main_loop.tick(ms(100)).rendered);
        assert_eq!(last_len.get(), 256);
    }
}
