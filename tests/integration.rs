#[cfg(test)]
mod integration_tests {
    use socdrm;
    use socdrm::prelude::*;

    #[test]
    fn test_library_initialization() {
        socdrm::init();
        assert!(!socdrm::version().is_empty());
    }

    #[test]
    fn test_registry_round_trip() {
        for vendor in supported_vendors() {
            let name = vendor.caps().name;
            let found = find_vendor(name).expect("registered vendor must be findable");
            assert_eq!(found.caps().name, name);
        }
    }

    #[cfg(feature = "rockchip")]
    #[test]
    fn test_rockchip_descriptor_shape() {
        let vendor = find_vendor("rockchip").unwrap();
        let caps = vendor.caps();
        assert_eq!(caps.cursor.width, 64);
        assert_eq!(caps.cursor.height, 64);
        assert_eq!(caps.cursor.padding, 16);
        assert_eq!(caps.cursor.api, HwCursorApi::Plane);
        assert!(caps.use_page_flip_events);
        assert!(caps.use_early_display);
        assert!(!caps.vblank_query_supported);

        // Both hooks are provided; plane init always succeeds without
        // touching the device.
        assert!(matches!(vendor.init_plane_for_cursor(-1, 0), Some(Ok(()))));
        let request = GemCreateRequest::from_raw_usage(64, 64, 32, BufferUsage::RAW_NON_SCANOUT);
        assert!(vendor.create_custom_gem(-1, &request).is_some());
    }

    #[test]
    fn test_caps_export_json() {
        let path = std::env::temp_dir().join("socdrm_caps_export.json");
        let path = path.to_str().unwrap();
        socdrm::export_caps_json(path).expect("export should succeed");

        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(
            value["vendors"].as_array().unwrap().len(),
            supported_vendors().len()
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    #[should_panic(expected = "invalid buffer usage")]
    fn test_unknown_usage_is_a_contract_violation() {
        let _ = GemCreateRequest::from_raw_usage(64, 64, 32, 7);
    }
}
