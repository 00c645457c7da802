//! Domain types for doses, vials, regimens, and schedule output.

pub mod dose;
pub mod regimen;
pub mod timeline;
pub mod vial;

// Re-export main types for convenience
pub use dose::{parse_numeric, DoseSpec};
pub use regimen::{CatalogError, Regimen, RegimenCatalog, RegimenRow};
pub use timeline::{PaymentStatus, TimelineEntry};
pub use vial::{Drug, VialCombination, OPDIVO_VIAL_SIZES, YERVOY_VIAL_SIZES};
