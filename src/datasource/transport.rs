//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use futures_util::future::BoxFuture;
use serde_json::Value as JsonValue;

/// Network transport collaborator.
///
/// Used for capability metadata lookups during configuration translation
/// and for fetching point sets. Requests run to completion or failure;
/// there is no cancellation and no timeout.
pub trait Transport: Send + Sync {
    /// Fetch and decode a JSON document
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<JsonValue, String>>;
}
