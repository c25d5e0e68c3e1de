use std::time::Duration;

use crate::{
    physical_parameters::{Channel, DataRate, DataRateSpec, LoRaBandwidth, Rx2Parameters, SpreadingFactor},
    regional_parameters::{band::{Band, DwellTime}, region::Region, version::PHYVersion},
};

use super::decreasing_offsets;

const MAX_DWELL_TIME: Duration = Duration::from_millis(400);

fn rev(version: PHYVersion, default_dwell_time: DwellTime) -> Band {
    let mut band = Band::new(
        Region::AS923,
        version,
        Rx2Parameters { frequency: 923_200_000, data_rate: DataRate::DR2 },
    )
    .with_frequency_range(915_000_000, 928_000_000)
    .with_max_eirp(16.0)
    .with_dwell_time(MAX_DWELL_TIME, default_dwell_time)
    .with_data_rate(DataRate::DR0, DataRateSpec::lora(SpreadingFactor::SF12, LoRaBandwidth::BW125, 59).dwell_limited(None))
    .with_data_rate(DataRate::DR1, DataRateSpec::lora(SpreadingFactor::SF11, LoRaBandwidth::BW125, 59).dwell_limited(None))
    .with_data_rate(DataRate::DR2, DataRateSpec::lora(SpreadingFactor::SF10, LoRaBandwidth::BW125, 59).dwell_limited(Some(19)))
    .with_data_rate(DataRate::DR3, DataRateSpec::lora(SpreadingFactor::SF9, LoRaBandwidth::BW125, 123).dwell_limited(Some(61)))
    .with_data_rate(DataRate::DR4, DataRateSpec::lora(SpreadingFactor::SF8, LoRaBandwidth::BW125, 230).dwell_limited(Some(133)))
    .with_data_rate(DataRate::DR5, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW125, 230).dwell_limited(Some(250)))
    .with_data_rate(DataRate::DR6, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW250, 230).dwell_limited(Some(250)))
    .with_data_rate(DataRate::DR7, DataRateSpec::fsk(50_000, 230).dwell_limited(Some(250)))
    .with_uplink_channels(vec![
        Channel::new(923_200_000, DataRate::DR0, DataRate::DR5),
        Channel::new(923_400_000, DataRate::DR0, DataRate::DR5),
    ]);

    for uplink in DataRate::range(DataRate::DR0, DataRate::DR7) {
        // Offsets 6 and 7 raise the data rate by one and two.
        let mut downlinks = decreasing_offsets(uplink, 6, DataRate::DR0, DataRate::DR5);
        downlinks.push(DataRate::new((uplink.value() + 1).min(5)));
        downlinks.push(DataRate::new((uplink.value() + 2).min(5)));
        band = band.with_rx1_data_rate_offsets(uplink, downlinks);
    }
    band
}

pub(super) fn bands() -> Vec<Band> {
    let unrestricted = DwellTime { uplinks: false, downlinks: false };
    let restricted = DwellTime { uplinks: true, downlinks: true };
    vec![
        rev(PHYVersion::V1_0_2_REV_A, unrestricted),
        rev(PHYVersion::V1_0_2_REV_B, restricted),
        rev(PHYVersion::V1_0_3_REV_A, restricted),
        rev(PHYVersion::V1_1_REV_A, restricted),
        rev(PHYVersion::V1_1_REV_B, restricted),
    ]
}
