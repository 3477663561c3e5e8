//! Database entities module

pub mod freight_tariff;

pub use freight_tariff::Entity as FreightTariff;
