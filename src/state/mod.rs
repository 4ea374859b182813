pub mod game_catalog;
pub mod signal_store;

pub use game_catalog::GameCatalog;
pub use signal_store::SignalStore;
