//! Process-wide default client
//!
//! The free functions here forward to a single [`Client`] with an empty base
//! URL and no default options. It is created on first use and never
//! reconfigured, so `opts.path` must be an absolute URL.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::context::Context;
use crate::request::{Method, Opts};
use crate::response::{RawResponse, Response};

static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(|| Client::new("", Opts::default()));

/// The shared default client
pub fn default_client() -> &'static Client {
    &DEFAULT_CLIENT
}

/// GET request on the default client
pub async fn get(ctx: &Context, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.get(ctx, opts).await
}

/// POST request on the default client
pub async fn post(ctx: &Context, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.post(ctx, opts).await
}

/// PUT request on the default client
pub async fn put(ctx: &Context, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.put(ctx, opts).await
}

/// DELETE request on the default client
pub async fn delete(ctx: &Context, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.delete(ctx, opts).await
}

/// PATCH request on the default client
pub async fn patch(ctx: &Context, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.patch(ctx, opts).await
}

/// Request with an arbitrary method on the default client
pub async fn request(ctx: &Context, method: Method, opts: Opts) -> Response<RawResponse> {
    DEFAULT_CLIENT.request(ctx, method, opts).await
}

/// JSON request with an arbitrary method on the default client
pub async fn request_json<T>(
    ctx: &Context,
    method: Method,
    opts: Opts,
    dst: Option<&mut T>,
) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.request_json(ctx, method, opts, dst).await
}

/// JSON GET request on the default client
pub async fn get_json<T>(ctx: &Context, opts: Opts, dst: Option<&mut T>) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.get_json(ctx, opts, dst).await
}

/// JSON POST request on the default client
pub async fn post_json<T>(ctx: &Context, opts: Opts, dst: Option<&mut T>) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.post_json(ctx, opts, dst).await
}

/// JSON PUT request on the default client
pub async fn put_json<T>(ctx: &Context, opts: Opts, dst: Option<&mut T>) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.put_json(ctx, opts, dst).await
}

/// JSON DELETE request on the default client
pub async fn delete_json<T>(
    ctx: &Context,
    opts: Opts,
    dst: Option<&mut T>,
) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.delete_json(ctx, opts, dst).await
}

/// JSON PATCH request on the default client
pub async fn patch_json<T>(
    ctx: &Context,
    opts: Opts,
    dst: Option<&mut T>,
) -> Response<RawResponse>
where
    T: DeserializeOwned + Send,
{
    DEFAULT_CLIENT.patch_json(ctx, opts, dst).await
}
