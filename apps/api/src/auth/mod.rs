// Session and account endpoints plus the extractors that gate the rest of
// the API. Identity always comes from the store's session snapshot.

pub mod guard;
pub mod handlers;
