use crate::{
    physical_parameters::{Channel, DataRate, DataRateSpec, LoRaBandwidth, Rx2Parameters, SpreadingFactor},
    regional_parameters::{band::Band, region::Region, version::PHYVersion},
};

use super::decreasing_offsets;

fn rev_1_0() -> Band {
    let mut band = Band::new(
        Region::EU863_870,
        PHYVersion::V1_0,
        Rx2Parameters { frequency: 869_525_000, data_rate: DataRate::DR0 },
    )
    .with_frequency_range(863_000_000, 870_000_000)
    .with_max_eirp(16.0)
    .with_data_rate(DataRate::DR0, DataRateSpec::lora(SpreadingFactor::SF12, LoRaBandwidth::BW125, 59))
    .with_data_rate(DataRate::DR1, DataRateSpec::lora(SpreadingFactor::SF11, LoRaBandwidth::BW125, 59))
    .with_data_rate(DataRate::DR2, DataRateSpec::lora(SpreadingFactor::SF10, LoRaBandwidth::BW125, 59))
    .with_data_rate(DataRate::DR3, DataRateSpec::lora(SpreadingFactor::SF9, LoRaBandwidth::BW125, 123))
    .with_data_rate(DataRate::DR4, DataRateSpec::lora(SpreadingFactor::SF8, LoRaBandwidth::BW125, 230))
    .with_data_rate(DataRate::DR5, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW125, 230))
    .with_data_rate(DataRate::DR6, DataRateSpec::lora(SpreadingFactor::SF7, LoRaBandwidth::BW250, 230))
    .with_data_rate(DataRate::DR7, DataRateSpec::fsk(50_000, 230))
    .with_uplink_channels(vec![
        Channel::new(868_100_000, DataRate::DR0, DataRate::DR5),
        Channel::new(868_300_000, DataRate::DR0, DataRate::DR5),
        Channel::new(868_500_000, DataRate::DR0, DataRate::DR5),
    ]);
    for dr in DataRate::range(DataRate::DR0, DataRate::DR7) {
        band = band.with_rx1_data_rate_offsets(dr, decreasing_offsets(dr, 6, DataRate::DR0, DataRate::DR7));
    }
    band
}

pub(super) fn bands() -> Vec<Band> {
    let base = rev_1_0();
    let versions = [
        PHYVersion::V1_0_1,
        PHYVersion::V1_0_2_REV_A,
        PHYVersion::V1_0_2_REV_B,
        PHYVersion::V1_0_3_REV_A,
        PHYVersion::V1_1_REV_A,
        PHYVersion::V1_1_REV_B,
    ];
    let mut bands = vec![base.clone()];
    bands.extend(versions.iter().map(|v| base.clone().revised(*v)));
    bands
}
