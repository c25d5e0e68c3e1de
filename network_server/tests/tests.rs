#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use lorawan::{
        device::Device,
        frequency_plans::FrequencyPlanDescription,
        physical_parameters::{Channel, DataRate, Modulation},
        regional_parameters::{catalog::RegionalCatalog, region::Region, version::PHYVersion},
        utils::{
            errors::{ChannelKind, RegionalError},
            eui::EUI64,
        },
    };
    use network_server::modules::{
        config::ServiceBase,
        error::NSError,
        init::{initialize, load_catalog, EventsBackend},
        network_server::{NetworkServer, UplinkMetadata},
    };

    fn server() -> NetworkServer {
        NetworkServer::new(RegionalCatalog::builtin().unwrap(), EventsBackend::Internal, 64)
    }

    fn device(plan_id: &str, version: &str) -> Device {
        Device::new(EUI64::from_hex("50de2646f9a7ac8e").unwrap(), plan_id, version.parse().unwrap())
    }

    fn uplink(frequency: u32, data_rate: u8, mac_payload_size: u16) -> UplinkMetadata {
        UplinkMetadata { frequency, data_rate: DataRate::new(data_rate), mac_payload_size }
    }

    #[tokio::test]
    async fn concurrent_contexts_are_identical() {
        let ns = Arc::new(server());
        let device = device("EU_863_870_TTN", "1.0.2a");
        let expected = ns.regional_context(&device).unwrap();
        assert_eq!(expected.band_version(), &PHYVersion::V1_0_2_REV_A);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let ns = Arc::clone(&ns);
                let device = device.clone();
                tokio::spawn(async move { ns.regional_context(&device).unwrap() })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn uplinks_are_checked_against_plan_and_band() {
        let ns = server();
        let eu = device("EU_863_870_TTN", "1.0.3a");

        let channel = ns.validate_uplink(&eu, &uplink(867_100_000, 5, 200)).unwrap();
        assert_eq!(channel.kind, ChannelKind::Uplink);
        assert_eq!(channel.index, 3);
        let channel = ns.validate_uplink(&eu, &uplink(868_300_000, 6, 200)).unwrap();
        assert_eq!(channel.kind, ChannelKind::LoRaStandard);

        for bad in [uplink(869_000_000, 0, 10), uplink(868_100_000, 6, 10), uplink(868_100_000, 0, 60)] {
            assert!(matches!(ns.validate_uplink(&eu, &bad), Err(NSError::InvalidUplink { .. })));
        }
    }

    #[tokio::test]
    async fn dwell_time_limits_the_payload() {
        let ns = server();
        let as923 = device("AS_920_923", "1.0.3a");
        assert!(matches!(
            ns.validate_uplink(&as923, &uplink(923_200_000, 0, 10)),
            Err(NSError::InvalidUplink { .. })
        ));
        assert!(ns.validate_uplink(&as923, &uplink(923_200_000, 3, 61)).is_ok());
        assert!(ns.validate_uplink(&as923, &uplink(923_200_000, 3, 62)).is_err());
    }

    #[tokio::test]
    async fn receive_windows() {
        let ns = server();

        let eu = device("EU_863_870_TTN", "1.0.2b");
        let rx1 = ns.rx1_parameters(&eu, &uplink(868_100_000, 5, 20), 1).unwrap();
        assert_eq!(rx1.frequency, 868_100_000);
        assert_eq!(rx1.data_rate, DataRate::DR4);
        let rx2 = ns.rx2_parameters(&eu).unwrap();
        assert_eq!((rx2.frequency, rx2.data_rate, rx2.max_eirp), (869_525_000, DataRate::DR3, 29.15));
        assert!(matches!(rx2.modulation, Modulation::LoRa { .. }));
        assert_eq!((rx1.delay, rx2.delay), (Duration::from_secs(1), Duration::from_secs(2)));

        let us = device("US_902_928_FSB_2", "1.0.3a");
        let rx1 = ns.rx1_parameters(&us, &uplink(903_900_000, 0, 10), 0).unwrap();
        assert_eq!((rx1.frequency, rx1.data_rate), (923_300_000, DataRate::DR10));
        let rx1 = ns.rx1_parameters(&us, &uplink(904_300_000, 3, 10), 3).unwrap();
        assert_eq!((rx1.frequency, rx1.data_rate), (924_500_000, DataRate::DR10));
        assert!(matches!(
            ns.rx1_parameters(&us, &uplink(903_900_000, 0, 10), 4),
            Err(NSError::InvalidRx1DataRateOffset { offset: 4, .. })
        ));
        assert_eq!(ns.rx2_parameters(&us).unwrap().data_rate, DataRate::DR8);
    }

    #[tokio::test]
    async fn rx1_needs_the_mapped_downlink_channel() {
        let plan = FrequencyPlanDescription {
            id: "US_902_928_HALF".to_string(),
            band_id: Some(Region::US902_928),
            uplink_channels: vec![
                Channel::new(903_900_000, DataRate::DR0, DataRate::DR3),
                Channel::new(904_900_000, DataRate::DR0, DataRate::DR3),
            ],
            downlink_channels: (0..4)
                .map(|i| Channel::new(923_300_000 + i * 600_000, DataRate::DR8, DataRate::DR13))
                .collect(),
            ..Default::default()
        };
        let catalog = RegionalCatalog::with_frequency_plans(vec![plan]).unwrap();
        let ns = NetworkServer::new(catalog, EventsBackend::Internal, 64);
        let us = device("US_902_928_HALF", "1.0.3a");

        // Band channel 8 maps to downlink channel 0.
        assert_eq!(ns.rx1_parameters(&us, &uplink(903_900_000, 0, 10), 0).unwrap().frequency, 923_300_000);
        // Band channel 13 maps to downlink channel 5, which the plan lacks.
        assert!(matches!(
            ns.rx1_parameters(&us, &uplink(904_900_000, 0, 10), 0),
            Err(NSError::InvalidDownlink(_))
        ));
        assert!(ns.rx2_parameters(&us).is_ok());
    }

    #[tokio::test]
    async fn joined_devices_keep_their_band() {
        let ns = server();
        let mut us = device("US_902_928_FSB_2", "1.0.1");
        us.join();
        us.set_lorawan_phy_version(PHYVersion::V1_0_3_REV_A);
        // DR8 carries 41 bytes before 1.0.2.
        let context = ns.regional_context(&us).unwrap();
        assert_eq!(context.band_version(), &PHYVersion::V1_0_1);
        assert_eq!(context.band().data_rate(DataRate::DR8).unwrap().max_mac_payload, 41);

        us.join();
        let context = ns.regional_context(&us).unwrap();
        assert_eq!(context.band_version(), &PHYVersion::V1_0_3_REV_A);
        assert_eq!(context.band().data_rate(DataRate::DR8).unwrap().max_mac_payload, 61);
    }

    #[tokio::test]
    async fn reload_replaces_cached_contexts() {
        let ns = server();
        let eu = device("EU_863_870_TTN", "1.0.2b");
        assert!(ns.regional_context(&eu).is_ok());

        assert_eq!(ns.reload_catalog(RegionalCatalog::default()), 1);
        assert!(matches!(
            ns.regional_context(&eu),
            Err(NSError::RegionalError(RegionalError::UnknownFrequencyPlan(_)))
        ));

        ns.reload_catalog(RegionalCatalog::builtin().unwrap());
        assert!(ns.regional_context(&eu).is_ok());
    }

    #[tokio::test]
    async fn unknown_plans_fail_and_old_versions_fall_back() {
        let ns = server();
        let context = ns.regional_context(&device("EU_863_870_TTN", "0.9")).unwrap();
        assert_eq!(context.band_version(), &PHYVersion::V1_0);
        assert!(context.is_fallback());
        assert!(matches!(
            ns.rx2_parameters(&device("UNKNOWN", "1.0.2b")),
            Err(NSError::RegionalError(RegionalError::UnknownFrequencyPlan(_)))
        ));
    }

    #[tokio::test]
    async fn demo_configuration_boots() {
        let mut config = ServiceBase::from_file("./configs/network_server.json").await.unwrap();
        let events = initialize(&mut config).unwrap();
        assert!(matches!(events, EventsBackend::Redis(ref redis) if redis.address == "localhost:6379"));
        assert_eq!(config.cache.redis, config.redis);

        let catalog = load_catalog(&config.frequency_plans).await.unwrap();
        let ns = NetworkServer::new(catalog, events, config.context_cache_size);
        for device in &config.devices {
            assert!(ns.regional_context(device).is_ok(), "{device}");
        }

        let rooftop = config.devices.iter().find(|d| d.frequency_plan_id() == "EU_863_870_ROOFTOP").unwrap();
        let rx1 = ns.rx1_parameters(rooftop, &uplink(868_100_000, 0, 10), 0).unwrap();
        assert_eq!(rx1.max_eirp, 14.0);
        assert_eq!(ns.rx2_parameters(rooftop).unwrap().max_eirp, 29.15);
    }
}
