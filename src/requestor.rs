//! Request execution and response decoding.
//!
//! The [`Requestor`] is the single engine every namespace dispatches
//! through: it turns an [`Endpoint`] plus call-time [`RequestArgs`] into a
//! lazy [`ApiStream`] of decoded values. Unary endpoints produce exactly one
//! element; streaming endpoints produce one element per non-empty response
//! line. Both shapes share the same decode path, so format and converter
//! live on the endpoint rather than at each call site.
//!
//! Laziness and teardown: no network I/O happens until the returned stream
//! is first polled, and dropping the stream drops the underlying response,
//! which closes the connection. The requestor holds no per-call state, so a
//! shared instance may serve any number of concurrent calls.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, debug_span, Instrument};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::{Converter, Format};
use crate::session::TokenSession;

/// Default deadline for unary requests, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A lazy sequence of decoded response values.
pub type ApiStream = BoxStream<'static, Result<Value, Error>>;

/// Per-call deadline.
///
/// The session's HTTP client carries no total timeout of its own, so this
/// is the only deadline applied to a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timeout {
    /// 30 seconds for unary calls; unbounded for streams.
    #[default]
    Default,
    /// Fail the whole call after the given duration.
    After(Duration),
    /// No deadline. Used for server-side matchmaking streams (board seeks)
    /// that intentionally block until a match or cancellation.
    Unbounded,
}

impl Timeout {
    fn effective(self, streaming: bool) -> Option<Duration> {
        match self {
            Self::After(duration) => Some(duration),
            Self::Unbounded => None,
            Self::Default if streaming => None,
            Self::Default => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// Raw text payload (comma-joined ID lists, pushed PGN).
    Text(String),
}

/// Call-time arguments: query parameters, payload, and deadline.
///
/// `None`-valued parameters are simply never added, matching the wire
/// protocol's treatment of absent query fields.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    /// Query parameters.
    pub params: Vec<(String, String)>,
    /// Request payload.
    pub body: Body,
    /// Per-call deadline.
    pub timeout: Timeout,
}

impl RequestArgs {
    /// Creates empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_owned(), value.to_string()));
        self
    }

    /// Adds a query parameter when the value is present.
    pub fn opt_param(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Sets a JSON payload.
    pub fn json(mut self, payload: Value) -> Self {
        self.body = Body::Json(payload);
        self
    }

    /// Sets a form-encoded payload.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Body::Form(fields);
        self
    }

    /// Sets a raw text payload.
    pub fn text(mut self, payload: impl Into<String>) -> Self {
        self.body = Body::Text(payload.into());
        self
    }

    /// Sets the per-call deadline.
    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The request execution engine.
///
/// One requestor is created per client session and shared by every resource
/// namespace. It owns the base URL and the default decoding format; the
/// authenticated transport lives in the [`TokenSession`].
#[derive(Debug, Clone)]
pub struct Requestor {
    session: TokenSession,
    base_url: Url,
    default_format: Format,
}

impl Requestor {
    /// Creates a requestor over the given session and base URL.
    pub fn new(session: TokenSession, base_url: Url, default_format: Format) -> Self {
        Self {
            session,
            base_url,
            default_format,
        }
    }

    /// The base URL endpoint paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Executes an endpoint and returns the lazy sequence of decoded values.
    ///
    /// Unary endpoints yield exactly one value; streaming endpoints yield
    /// one value per non-empty response line, in arrival order. A non-2xx
    /// status surfaces as [`Error::Status`] before any value is yielded.
    /// Nothing is retried.
    pub fn stream(&self, endpoint: &Endpoint, args: RequestArgs) -> ApiStream {
        // The span must live on the dispatch future, not this method:
        // nothing here performs I/O, so a method-scoped span would close
        // before the first event fires.
        let span = debug_span!("request", path = %endpoint.path, method = %endpoint.method);
        let client = self.session.client().clone();
        let format = endpoint.format.unwrap_or(self.default_format);
        let converter = endpoint.converter;
        let streaming = endpoint.stream;
        let method = endpoint.method;
        let url = self
            .base_url
            .join(&endpoint.path)
            .map_err(|e| Error::Config(format!("invalid URL: {e}")));

        let open = async move {
            let url = url?;
            debug!(http.method = %method, http.url = %url, "dispatching request");

            let mut request = client
                .request(method.to_reqwest(), url)
                .header(ACCEPT, format.mime_type());
            if !args.params.is_empty() {
                request = request.query(&args.params);
            }
            request = match args.body {
                Body::Empty => request,
                Body::Json(payload) => request.json(&payload),
                Body::Form(fields) => request.form(&fields),
                Body::Text(payload) => request.body(payload),
            };
            if let Some(deadline) = args.timeout.effective(streaming) {
                request = request.timeout(deadline);
            }

            let response = request.send().await.map_err(Error::Transport)?;
            let status = response.status();
            debug!(http.status_code = status.as_u16(), "response received");

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                return Err(Error::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            if streaming {
                let frames = response.bytes_stream().map_err(Error::Transport).boxed();
                Ok(LineStream::new(frames, format, converter).boxed())
            } else {
                let text = response.text().await.map_err(Error::Transport)?;
                let value = format.handle(&text, converter)?;
                Ok(stream::iter([Ok(value)]).boxed())
            }
        };

        // Nothing above runs until the first poll of this outer stream.
        stream::once(open.instrument(span))
            .map(|opened: Result<ApiStream, Error>| match opened {
                Ok(values) => values,
                Err(err) => stream::iter([Err(err)]).boxed(),
            })
            .flatten()
            .boxed()
    }

    /// Executes a unary endpoint and awaits its single decoded value.
    pub async fn single(&self, endpoint: &Endpoint, args: RequestArgs) -> Result<Value, Error> {
        let mut values = self.stream(endpoint, args);
        match values.next().await {
            Some(result) => result,
            // A unary endpoint always yields one element; reaching this
            // means the endpoint was a stream misused as a single call.
            None => Err(Error::Config(format!(
                "endpoint {} produced no value",
                endpoint.path
            ))),
        }
    }
}

/// Decodes a byte stream into one value per newline-terminated line.
///
/// Frames from the HTTP body accumulate in an internal buffer until one or
/// more `\n`-terminated lines can be extracted; each non-empty line is
/// decoded with the endpoint's format and converter and queued for the
/// consumer. Lines may span frame boundaries and a single frame may carry
/// several lines. A partial final line without `\n` at EOF is discarded.
///
/// The stream is terminal on error: once a decode or transport failure has
/// been yielded, iteration ends.
struct LineStream {
    frames: BoxStream<'static, Result<Bytes, Error>>,
    format: Format,
    converter: Option<Converter>,
    buffer: Vec<u8>,
    queue: VecDeque<Result<Value, Error>>,
    done: bool,
}

impl LineStream {
    fn new(
        frames: BoxStream<'static, Result<Bytes, Error>>,
        format: Format,
        converter: Option<Converter>,
    ) -> Self {
        Self {
            frames,
            format,
            converter,
            buffer: Vec::with_capacity(256),
            queue: VecDeque::with_capacity(16),
            done: false,
        }
    }

    /// Appends a frame and decodes any completed lines into the queue.
    fn append_frame(&mut self, frame: &[u8]) {
        self.buffer.extend_from_slice(frame);

        let mut processed = 0;
        while let Some(offset) = self.buffer[processed..].iter().position(|&b| b == b'\n') {
            let end = processed + offset;
            let mut line = &self.buffer[processed..end];
            if line.ends_with(b"\r") {
                line = &line[..line.len() - 1];
            }
            if !line.is_empty() {
                let item = match std::str::from_utf8(line) {
                    Ok(text) => self.format.handle(text, self.converter),
                    // Invalid UTF-8 is never lossily repaired; re-parsing
                    // the raw bytes reports it with the decoder's own
                    // error type.
                    Err(_) => serde_json::from_slice(line).map_err(Error::from),
                };
                self.queue.push_back(item);
            }
            processed = end + 1;
        }
        self.buffer.drain(..processed);
    }
}

impl Stream for LineStream {
    type Item = Result<Value, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if self.done {
                return Poll::Ready(None);
            }
            if let Some(item) = self.queue.pop_front() {
                if item.is_err() {
                    // Terminal error state: drop anything decoded after it.
                    self.done = true;
                    self.queue.clear();
                }
                return Poll::Ready(Some(item));
            }
            match ready!(self.frames.poll_next_unpin(cx)) {
                Some(Ok(frame)) => self.append_frame(&frame),
                Some(Err(err)) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    self.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}
