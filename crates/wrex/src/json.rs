//! Typed JSON requests

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::client::{Client, CONTENT_TYPE};
use crate::context::Context;
use crate::error::HttpError;
use crate::request::{Method, Opts};
use crate::response::{RawResponse, Response};

const ACCEPT: &str = "Accept";
const JSON_CONTENT_TYPE: &str = "application/json";

impl Client {
    /// Send a JSON request and decode the response body into `dst`
    ///
    /// `Accept` and `Content-Type` default to `application/json` unless the
    /// caller already set them. Decoding only happens after the exchange
    /// succeeded; a body that does not fit `T` yields [`HttpError::Decode`],
    /// which still carries the response. With `dst` set to `None` the body is
    /// left undecoded.
    #[instrument(skip_all, fields(method = %method, path = %opts.path))]
    pub async fn request_json<T>(
        &self,
        ctx: &Context,
        method: Method,
        mut opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        opts.default_header(ACCEPT, JSON_CONTENT_TYPE);
        opts.default_header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        let response = self.request(ctx, method, opts).await?;

        if let Some(dst) = dst {
            match serde_json::from_slice::<T>(response.data()) {
                Ok(value) => *dst = value,
                Err(source) => {
                    tracing::warn!("Http Response decode error: {}", source);
                    return Err(HttpError::Decode {
                        source,
                        response: Box::new(response),
                    });
                }
            }
        }

        Ok(response)
    }

    /// GET request decoding the JSON response into `dst`
    pub async fn get_json<T>(
        &self,
        ctx: &Context,
        opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        self.request_json(ctx, Method::Get, opts, dst).await
    }

    /// POST request decoding the JSON response into `dst`
    pub async fn post_json<T>(
        &self,
        ctx: &Context,
        opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        self.request_json(ctx, Method::Post, opts, dst).await
    }

    /// PUT request decoding the JSON response into `dst`
    pub async fn put_json<T>(
        &self,
        ctx: &Context,
        opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        self.request_json(ctx, Method::Put, opts, dst).await
    }

    /// DELETE request decoding the JSON response into `dst`
    pub async fn delete_json<T>(
        &self,
        ctx: &Context,
        opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        self.request_json(ctx, Method::Delete, opts, dst).await
    }

    /// PATCH request decoding the JSON response into `dst`
    pub async fn patch_json<T>(
        &self,
        ctx: &Context,
        opts: Opts,
        dst: Option<&mut T>,
    ) -> Response<RawResponse>
    where
        T: DeserializeOwned + Send,
    {
        self.request_json(ctx, Method::Patch, opts, dst).await
    }
}
