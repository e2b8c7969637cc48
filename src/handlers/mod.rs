// handlers/mod.rs - Handlers split by security tier
//
// Public (no auth) → Protected (bearer token required)
pub mod public; // /api/v1/auth/*
pub mod protected; // /api/v1/jobs/*

pub mod status; // / and /health
