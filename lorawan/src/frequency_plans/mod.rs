use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    physical_parameters::{Channel, DataRate, Rx2Parameters},
    regional_parameters::{band::DwellTime, region::Region},
    utils::errors::{ChannelKind, RegionalError},
};

const BUILTIN_FREQUENCY_PLANS: &str = include_str!("builtin.json");

/// A frequency range with its regulatory duty cycle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubBand {
    pub min_frequency: u32,
    pub max_frequency: u32,
    pub duty_cycle: f32,
    #[serde(default)]
    pub max_eirp: Option<f32>,
}

impl SubBand {
    pub fn contains(&self, frequency: u32) -> bool {
        self.min_frequency <= frequency && frequency <= self.max_frequency
    }
}

/// Frequency plan as written by operators. A description may extend another
/// one through `base_id`, overriding the fields it sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPlanDescription {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default)]
    pub band_id: Option<Region>,
    #[serde(default)]
    pub uplink_channels: Vec<Channel>,
    #[serde(default)]
    pub downlink_channels: Vec<Channel>,
    #[serde(default)]
    pub lora_standard_channel: Option<Channel>,
    #[serde(default)]
    pub fsk_channel: Option<Channel>,
    #[serde(default)]
    pub sub_bands: Vec<SubBand>,
    #[serde(default)]
    pub rx2_channel: Option<Rx2Parameters>,
    #[serde(default)]
    pub max_eirp: Option<f32>,
    #[serde(default)]
    pub dwell_time: Option<DwellTime>,
}

impl FrequencyPlanDescription {
    fn extended_by(self, child: &FrequencyPlanDescription) -> Self {
        fn pick<T: Clone>(base: Vec<T>, child: &[T]) -> Vec<T> {
            if child.is_empty() { base } else { child.to_vec() }
        }
        Self {
            id: child.id.clone(),
            base_id: child.base_id.clone(),
            name: child.name.clone().or(self.name),
            band_id: child.band_id.or(self.band_id),
            uplink_channels: pick(self.uplink_channels, &child.uplink_channels),
            downlink_channels: pick(self.downlink_channels, &child.downlink_channels),
            lora_standard_channel: child.lora_standard_channel.or(self.lora_standard_channel),
            fsk_channel: child.fsk_channel.or(self.fsk_channel),
            sub_bands: pick(self.sub_bands, &child.sub_bands),
            rx2_channel: child.rx2_channel.or(self.rx2_channel),
            max_eirp: child.max_eirp.or(self.max_eirp),
            dwell_time: child.dwell_time.or(self.dwell_time),
        }
    }
}

/// A channel deployment for one region. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyPlan {
    id: String,
    name: String,
    region: Region,
    uplink_channels: Vec<Channel>,
    downlink_channels: Vec<Channel>,
    lora_standard_channel: Option<Channel>,
    fsk_channel: Option<Channel>,
    sub_bands: Vec<SubBand>,
    rx2_channel: Option<Rx2Parameters>,
    max_eirp: Option<f32>,
    dwell_time: Option<DwellTime>,
}

impl TryFrom<FrequencyPlanDescription> for FrequencyPlan {
    type Error = RegionalError;

    fn try_from(d: FrequencyPlanDescription) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| RegionalError::InvalidFrequencyPlanDescription { plan_id: d.id.clone(), reason: reason.to_string() };

        let region = d.band_id.ok_or_else(|| invalid("no band id"))?;
        if d.uplink_channels.is_empty() {
            return Err(invalid("no uplink channels"));
        }
        if let Some(sub_band) = d.sub_bands.iter().find(|s| s.min_frequency > s.max_frequency) {
            return Err(invalid(&format!("sub-band {}..={} is inverted", sub_band.min_frequency, sub_band.max_frequency)));
        }
        if d.sub_bands.iter().any(|s| !(s.duty_cycle > 0.0 && s.duty_cycle <= 1.0)) {
            return Err(invalid("sub-band duty cycle outside (0, 1]"));
        }

        Ok(Self {
            name: d.name.clone().unwrap_or_else(|| d.id.clone()),
            id: d.id,
            region,
            uplink_channels: d.uplink_channels,
            downlink_channels: d.downlink_channels,
            lora_standard_channel: d.lora_standard_channel,
            fsk_channel: d.fsk_channel,
            sub_bands: d.sub_bands,
            rx2_channel: d.rx2_channel,
            max_eirp: d.max_eirp,
            dwell_time: d.dwell_time,
        })
    }
}

impl FrequencyPlan {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region of the band family this plan is deployed under.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn uplink_channels(&self) -> &[Channel] {
        &self.uplink_channels
    }

    pub fn downlink_channels(&self) -> &[Channel] {
        &self.downlink_channels
    }

    pub fn lora_standard_channel(&self) -> Option<&Channel> {
        self.lora_standard_channel.as_ref()
    }

    pub fn fsk_channel(&self) -> Option<&Channel> {
        self.fsk_channel.as_ref()
    }

    pub fn sub_bands(&self) -> &[SubBand] {
        &self.sub_bands
    }

    pub fn sub_band(&self, frequency: u32) -> Option<&SubBand> {
        self.sub_bands.iter().find(|s| s.contains(frequency))
    }

    pub fn rx2_channel(&self) -> Option<&Rx2Parameters> {
        self.rx2_channel.as_ref()
    }

    pub fn max_eirp(&self) -> Option<f32> {
        self.max_eirp
    }

    pub fn dwell_time(&self) -> Option<&DwellTime> {
        self.dwell_time.as_ref()
    }

    /// Every channel of the plan with its kind and index in its list.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelKind, usize, &Channel)> {
        let uplinks = self.uplink_channels.iter().enumerate().map(|(i, c)| (ChannelKind::Uplink, i, c));
        let downlinks = self.downlink_channels.iter().enumerate().map(|(i, c)| (ChannelKind::Downlink, i, c));
        let lora_standard = self.lora_standard_channel.iter().map(|c| (ChannelKind::LoRaStandard, 0, c));
        let fsk = self.fsk_channel.iter().map(|c| (ChannelKind::FSK, 0, c));
        uplinks.chain(downlinks).chain(lora_standard).chain(fsk)
    }

    /// The channel a device may transmit on at `frequency` with `data_rate`.
    pub fn uplink_channel(&self, frequency: u32, data_rate: DataRate) -> Option<(ChannelKind, usize, &Channel)> {
        self.channels()
            .filter(|(kind, _, _)| *kind != ChannelKind::Downlink)
            .find(|(_, _, c)| c.frequency == frequency && c.supports(data_rate))
    }
}

/// Immutable catalog of frequency plans, keyed by plan id.
#[derive(Clone, Debug, Default)]
pub struct Store {
    plans: HashMap<String, Arc<FrequencyPlan>>,
}

impl Store {
    /// Resolves `base_id` inheritance and builds every plan.
    pub fn from_descriptions(descriptions: Vec<FrequencyPlanDescription>) -> Result<Self, RegionalError> {
        let mut by_id = HashMap::with_capacity(descriptions.len());
        for description in descriptions {
            let id = description.id.clone();
            if by_id.insert(id.clone(), description).is_some() {
                return Err(RegionalError::DuplicateFrequencyPlan(id));
            }
        }

        let mut plans = HashMap::with_capacity(by_id.len());
        for id in by_id.keys() {
            let flattened = flatten(id, &by_id, &mut Vec::new())?;
            plans.insert(id.clone(), Arc::new(FrequencyPlan::try_from(flattened)?));
        }
        Ok(Self { plans })
    }

    /// Loads a JSON array of plan descriptions.
    pub fn from_json(json: &str) -> Result<Self, RegionalError> {
        Self::from_descriptions(serde_json::from_str(json)?)
    }

    pub fn builtin() -> Result<Self, RegionalError> {
        Self::from_descriptions(builtin_descriptions()?)
    }

    pub fn get_by_id(&self, plan_id: &str) -> Result<Arc<FrequencyPlan>, RegionalError> {
        self.plans
            .get(plan_id)
            .cloned()
            .ok_or_else(|| RegionalError::UnknownFrequencyPlan(plan_id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// The compiled-in plan descriptions, so configured plans can extend them.
pub fn builtin_descriptions() -> Result<Vec<FrequencyPlanDescription>, RegionalError> {
    Ok(serde_json::from_str(BUILTIN_FREQUENCY_PLANS)?)
}

fn flatten(
    id: &str,
    descriptions: &HashMap<String, FrequencyPlanDescription>,
    children: &mut Vec<String>,
) -> Result<FrequencyPlanDescription, RegionalError> {
    let description = descriptions
        .get(id)
        .ok_or_else(|| RegionalError::UnknownFrequencyPlan(id.to_string()))?;
    let base_id = match &description.base_id {
        None => return Ok(description.clone()),
        Some(base_id) => base_id,
    };
    if base_id == id || children.iter().any(|c| c == base_id) {
        return Err(RegionalError::FrequencyPlanCycle(id.to_string()));
    }
    if !descriptions.contains_key(base_id) {
        return Err(RegionalError::UnknownBaseFrequencyPlan { plan_id: id.to_string(), base_id: base_id.clone() });
    }
    children.push(id.to_string());
    let base = flatten(base_id, descriptions, children)?;
    children.pop();
    Ok(base.extended_by(description))
}
