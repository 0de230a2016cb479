//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filter;
pub mod layer_cache;

pub use self::filter::FilterCache;
pub use self::layer_cache::LayerCache;

#[cfg(test)]
mod filter_test;
