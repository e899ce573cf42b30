pub mod lookup;
pub mod lookup_state;
pub mod slug_list;
pub mod storage;

pub use lookup::ProvinceLookup;
pub use lookup_state::{LookupResult, LookupState, LookupTicket};
pub use slug_list::{SlugList, FAVORITES_KEY, RECENTS_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
