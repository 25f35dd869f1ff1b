mod catalogs;
pub(crate) mod utils;
