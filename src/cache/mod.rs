mod key;
mod store;

pub use key::{ArticleKey, MAX_KEY_LEN};
pub use store::{CacheError, CacheStore, encode_jsonl};
