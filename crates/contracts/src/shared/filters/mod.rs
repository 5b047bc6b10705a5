//! Cascading filter contracts: keys, values, the sparse selection and the
//! per-key option sets returned by `/api/filtros/opciones`.

pub mod key;
pub mod options;
pub mod selection;

pub use key::{FilterKey, FilterValue};
pub use options::{FilterOption, FilterOptionSet, RawFilterOption, RawFilterOptions, TOP_FARM_CHOICES};
pub use selection::FilterSelection;
