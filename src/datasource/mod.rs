//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod source;
pub mod transport;

pub use self::source::{identity_filter, PointFilter, PointSource};
pub use self::transport::Transport;
