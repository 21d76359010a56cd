// Admin console endpoints: account roster, dashboard aggregates, the
// activity feed, and the CSV export. Everything here sits behind the
// AdminAccount guard.

pub mod export;
pub mod handlers;
