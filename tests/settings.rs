mod tests {
    use embassy_time::Duration;
    use sparkle_matrix_composer::color::rgb_from_u32;
    use sparkle_matrix_composer::settings::{Settings, SettingsError};

    #[test]
    fn test_full_document() {
        let settings = Settings::from_json(
            br#"{"num_sparkles":50,"frame_rate":10,"transition_time":2,"sparkle_size":2,"num_palettes":4}"#,
        )
        .unwrap();
        assert_eq!(settings.num_sparkles, 50);
        assert_eq!(settings.frame_interval, Duration::from_millis(100));
        assert_eq!(settings.transition_time, Duration::from_millis(2000));
        assert_eq!(settings.sparkle_size, 2);
        assert_eq!(settings.num_palettes, 4);
        assert_eq!(settings.slot_count(), 4);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = Settings::from_json(b"{}").unwrap();
        assert_eq!(settings.num_sparkles, 10);
        assert_eq!(settings.sparkle_size, 1);
        // speed default is 10ms between updates
        assert_eq!(settings.frame_interval, Duration::from_millis(10));
        assert_eq!(settings.transition_time, Duration::from_millis(2000));
        assert!(settings.colors.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings =
            Settings::from_json(br#"{"num_sparkles":5,"brightness":200}"#).unwrap();
        assert_eq!(settings.num_sparkles, 5);
    }

    #[test]
    fn test_speed_variant_pacing() {
        let settings = Settings::from_json(br#"{"speed":250}"#).unwrap();
        assert_eq!(settings.frame_interval, Duration::from_millis(250));

        // frame_rate wins over speed when both are present
        let settings = Settings::from_json(br#"{"speed":250,"frame_rate":20}"#).unwrap();
        assert_eq!(settings.frame_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_fractional_frame_rate() {
        let settings = Settings::from_json(br#"{"frame_rate":2.5}"#).unwrap();
        assert_eq!(settings.frame_interval, Duration::from_millis(400));
    }

    #[test]
    fn test_explicit_color_list() {
        let settings =
            Settings::from_json(br#"{"colors":[16711680,255,65280]}"#).unwrap();
        assert_eq!(settings.slot_count(), 3);
        assert_eq!(settings.colors[0], rgb_from_u32(0xFF0000));
        assert_eq!(settings.colors[1], rgb_from_u32(0x0000FF));
        assert_eq!(settings.colors[2], rgb_from_u32(0x00FF00));
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        assert_eq!(
            Settings::from_json(br#"{"frame_rate":0}"#),
            Err(SettingsError::FrameRateOutOfRange)
        );
        assert_eq!(
            Settings::from_json(br#"{"frame_rate":-5}"#),
            Err(SettingsError::FrameRateOutOfRange)
        );
    }

    #[test]
    fn test_zero_sparkles_rejected() {
        assert_eq!(
            Settings::from_json(br#"{"num_sparkles":0}"#),
            Err(SettingsError::SparkleCountOutOfRange)
        );
        assert_eq!(
            Settings::from_json(br#"{"num_sparkles":-1}"#),
            Err(SettingsError::SparkleCountOutOfRange)
        );
    }

    #[test]
    fn test_other_ranges_rejected() {
        assert_eq!(
            Settings::from_json(br#"{"sparkle_size":0}"#),
            Err(SettingsError::SparkleSizeOutOfRange)
        );
        assert_eq!(
            Settings::from_json(br#"{"transition_time":0}"#),
            Err(SettingsError::TransitionOutOfRange)
        );
        assert_eq!(
            Settings::from_json(br#"{"speed":0}"#),
            Err(SettingsError::UpdateRateOutOfRange)
        );
        assert_eq!(
            Settings::from_json(br#"{"num_palettes":0}"#),
            Err(SettingsError::EmptyPalette)
        );
        assert_eq!(
            Settings::from_json(br#"{"colors":[]}"#),
            Err(SettingsError::EmptyPalette)
        );
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert_eq!(
            Settings::from_json(b"not json"),
            Err(SettingsError::Malformed)
        );
        assert_eq!(
            Settings::from_json(br#"{"num_sparkles":"many"}"#),
            Err(SettingsError::Malformed)
        );
    }
}
