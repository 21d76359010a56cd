// Resume endpoints: list/create for the signed-in account, item-level
// read/update/delete for owners and administrators.

pub mod handlers;
