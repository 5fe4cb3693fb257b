mod config;
pub use self::config::{Config, ContextUnitKind, Dataset, Pprint, TransformConfig, WordUnitKind};
