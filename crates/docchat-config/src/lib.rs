// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! docchat configuration: the [`Config`] schema and the layered [`load`]er.

mod loader;
mod schema;

pub use loader::load;
pub use schema::*;
