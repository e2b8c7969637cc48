// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition lives here. These handlers trust nothing about the
// caller, so every input goes through the validation layer first.

pub mod auth;
