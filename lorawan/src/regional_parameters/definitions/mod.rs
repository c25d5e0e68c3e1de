//! Compiled-in regional parameters.

use crate::{physical_parameters::DataRate, regional_parameters::band::Band};

mod as_923;
mod eu_863_870;
mod us_902_928;

/// Every compiled-in band revision.
pub fn all() -> Vec<Band> {
    let mut bands = eu_863_870::bands();
    bands.extend(us_902_928::bands());
    bands.extend(as_923::bands());
    bands
}

/// RX1 data rate for each offset, subtracting the offset from the uplink
/// data rate within `[min, max]`.
fn decreasing_offsets(uplink: DataRate, offsets: u8, min: DataRate, max: DataRate) -> Vec<DataRate> {
    (0..offsets)
        .map(|offset| DataRate::new(uplink.value().saturating_sub(offset).clamp(min.value(), max.value())))
        .collect()
}
