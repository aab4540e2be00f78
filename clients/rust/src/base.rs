use futures::{stream::BoxStream, StreamExt};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
        }
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.address, path);
        self.client.request(method, &url)
    }

    fn check_status_code(res: &Response, expected_status_code: StatusCode) -> Result<(), APIError> {
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError::UnexpectedStatusCode(status));
        }
        Ok(())
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        Self::check_status_code(&res, expected_status_code)?;
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match builder.send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), expected_status_code)
            .await
    }

    pub async fn put<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::PUT, path).json(&body);
        self.send(builder, expected_status_code).await
    }

    pub async fn patch<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::PATCH, path).json(&body);
        self.send(builder, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::POST, path).json(&body);
        self.send(builder, expected_status_code).await
    }

    /// Opens a route that streams one JSON document per line
    pub async fn live<T: DeserializeOwned>(&self, path: String) -> APIResponse<LiveStream<T>> {
        let res = match self.get_client(Method::GET, path).send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        Self::check_status_code(&res, StatusCode::OK)?;
        Ok(LiveStream {
            chunks: res.bytes_stream().boxed(),
            buffer: Vec::new(),
            _item: PhantomData,
        })
    }
}

/// Items of a live route in the order the server sent them
pub struct LiveStream<T> {
    chunks: BoxStream<'static, reqwest::Result<bytes::Bytes>>,
    buffer: Vec<u8>,
    _item: PhantomData<T>,
}

impl<T: DeserializeOwned> LiveStream<T> {
    /// Waits for the next item, `None` once the server closed the stream
    pub async fn next(&mut self) -> Option<APIResponse<T>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                let line = &line[..line.len() - 1];
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                return Some(serde_json::from_slice(line).map_err(|_| APIError::MalformedResponse));
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(_)) => return Some(Err(APIError::Network)),
                None => return None,
            }
        }
    }
}
