pub mod band;
pub mod band_family;
pub mod catalog;
pub mod definitions;
pub mod region;
pub mod registry;
pub mod resolver;
pub mod version;
pub mod version_resolver;
