mod loading;
mod single;
mod sync;

pub use loading::LoadingCache;
pub use single::{SingleElementCache, SingleElementLoadingCache, SingleKey};
pub use sync::Cache;
