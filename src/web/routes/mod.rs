//! Web Routes
//!
//! Route handlers organized by page.

pub mod contact;
pub mod data;
pub mod download;
pub mod gallery;
pub mod health;
pub mod pages;
pub mod theme;
