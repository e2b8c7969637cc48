// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `middleware::authenticate`, which runs before
// body extraction and validation. Handlers take `CurrentUser` and pass its id
// to every store call so records are always scoped to their owner.

pub mod jobs;
