//! HTTP handlers, one module per feature surface.

pub mod auth;
pub mod expenses;
pub mod habits;
pub mod moods;
pub mod pages;
pub mod recipes;
pub mod theme;
pub mod tips;
