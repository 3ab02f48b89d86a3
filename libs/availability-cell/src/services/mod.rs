pub mod generator;
pub mod query;
pub mod ranges;

pub use generator::SlotGeneratorService;
pub use query::AvailabilityQueryService;
pub use ranges::AvailabilityRangeService;
