use crate::{
    physical_parameters::{Channel, DataRate, DataRateSpec, LoRaBandwidth, Rx2Parameters, SpreadingFactor},
    regional_parameters::{band::{Band, Rx1ChannelMapping}, region::Region, version::PHYVersion},
};

/// DR8 and DR9 payload sizes grew with regional parameters 1.0.2.
fn rev(version: PHYVersion, dr8_payload: u16, dr9_payload: u16) -> Band {
    let uplink_channels = (0..64)
        .map(|i| Channel::new(902_300_000 + i * 200_000, DataRate::DR0, DataRate::DR3))
        .chain((0..8).map(|i| Channel::new(903_000_000 + i * 1_600_000, DataRate::DR4, DataRate::DR4)))
        .collect();
    let downlink_channels = (0..8)
        .map(|i| Channel::new(923_300_000 + i * 600_000, DataRate::DR8, DataRate::DR13))
        .collect();

    let mut band = Band::new(
        Region::US902_928,
        version,
        Rx2Parameters { frequency: 923_300_000, data_rate: DataRate::DR8 },
    )
    .with_frequency_range(902_000_000, 928_000_000)
    .with_max_eirp(30.0)
    .with_rx1_channel(Rx1ChannelMapping::Modulo(8))
    .with_data_rate(DataRate::DR0, DataRateSpec::lora(SpreadingFactor::SF10, LoRaBandwidth::BW125, 19))
    .with_data_rate(DataRate::DR1, DataRateSpec::lora(SpreadingFactor::SF9, LoRaBandwidth::BW125, 61))
    .with_data_rate(DataRate::DR2, DataRateSpec::lora(SpreadingFactor::SF8, LoRaBandwidth::BW125, 133))
    .with_data_rate(DataRate::DR3, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW125, 250))
    .with_data_rate(DataRate::DR4, DataRateSpec::lora(SpreadingFactor::SF8, LoRaBandwidth::BW500, 250))
    .with_data_rate(DataRate::DR8, DataRateSpec::lora(SpreadingFactor::SF12, LoRaBandwidth::BW500, dr8_payload))
    .with_data_rate(DataRate::DR9, DataRateSpec::lora(SpreadingFactor::SF11, LoRaBandwidth::BW500, dr9_payload))
    .with_data_rate(DataRate::DR10, DataRateSpec::lora(SpreadingFactor::SF10, LoRaBandwidth::BW500, 230))
    .with_data_rate(DataRate::DR11, DataRateSpec::lora(SpreadingFactor::SF9, LoRaBandwidth::BW500, 230))
    .with_data_rate(DataRate::DR12, DataRateSpec::lora(SpreadingFactor::SF8, LoRaBandwidth::BW500, 230))
    .with_data_rate(DataRate::DR13, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW500, 230))
    .with_uplink_channels(uplink_channels)
    .with_downlink_channels(downlink_channels);

    for uplink in DataRate::range(DataRate::DR0, DataRate::DR4) {
        let downlinks = (0..4)
            .map(|offset: u8| DataRate::new((10 + uplink.value()).saturating_sub(offset).clamp(8, 13)))
            .collect();
        band = band.with_rx1_data_rate_offsets(uplink, downlinks);
    }
    band
}

pub(super) fn bands() -> Vec<Band> {
    vec![
        rev(PHYVersion::V1_0, 41, 117),
        rev(PHYVersion::V1_0_1, 41, 117),
        rev(PHYVersion::V1_0_2_REV_A, 61, 137),
        rev(PHYVersion::V1_0_2_REV_B, 61, 137),
        rev(PHYVersion::V1_0_3_REV_A, 61, 137),
        rev(PHYVersion::V1_1_REV_A, 61, 137),
        rev(PHYVersion::V1_1_REV_B, 61, 137),
    ]
}
