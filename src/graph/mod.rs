/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod client;
pub mod errors;
pub mod exception;
pub mod paging;
pub mod params;
mod parsers;
pub mod photo;

pub use api::*;
pub use client::*;
pub use errors::*;
pub use exception::*;
pub use paging::*;
pub use params::*;
pub use photo::*;
