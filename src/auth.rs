use std::collections::HashSet;
use std::marker::PhantomData;

use headers::authorization::{Bearer, Credentials};
use http::{header, Request, Response, StatusCode};
use tower_http::validate_request::ValidateRequest;

/// Static bearer-token check for the API routes. An empty token list
/// lets every request through.
pub struct TokenValidate<ResBody> {
    tokens: HashSet<String>,
    _ty: PhantomData<ResBody>,
}

impl<ResBody> TokenValidate<ResBody> {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            _ty: PhantomData,
        }
    }
}

impl<ResBody> Clone for TokenValidate<ResBody> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            _ty: PhantomData,
        }
    }
}

impl<B: Default> ValidateRequest<B> for TokenValidate<B> {
    type ResponseBody = B;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        if self.tokens.is_empty() {
            return Ok(());
        }
        match request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(Bearer::decode)
        {
            Some(bearer) if self.tokens.contains(bearer.token()) => Ok(()),
            _ => Err(Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .body(B::default())
                .unwrap()),
        }
    }
}
