// Models module

pub mod name_record;

// Re-export commonly used types
pub use name_record::{
    first_param, normalize_name, ListNamesQuery, NameLimit, NameListResponse, NameRecord,
};
