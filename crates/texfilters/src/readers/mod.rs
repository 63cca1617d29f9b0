/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod json;
pub mod table;
