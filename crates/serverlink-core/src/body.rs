use std::fmt;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{BoxStream, Stream, StreamExt, TryStreamExt};

pub type ChunkStream = BoxStream<'static, anyhow::Result<Bytes>>;

/// Payload of a request or response.
///
/// Requests coming from Lambda are always `Buffered`. A handler may answer with a
/// `Streaming` body; adapters [`collect`](Body::collect) it before replying.
pub enum Body {
    Buffered(Bytes),
    Streaming(ChunkStream),
}

impl Body {
    pub fn empty() -> Self {
        Body::Buffered(Bytes::new())
    }

    pub fn from_stream<S, E>(chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        Body::Streaming(chunks.map_err(Into::<anyhow::Error>::into).boxed())
    }

    /// The buffered payload; `None` while the body is still a stream.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Buffered(bytes) => Some(bytes),
            Body::Streaming(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Buffered(bytes) if bytes.is_empty())
    }

    /// Concatenate every chunk. The first failing chunk aborts collection.
    pub async fn collect(self) -> anyhow::Result<Bytes> {
        let mut chunks = match self {
            Body::Buffered(bytes) => return Ok(bytes),
            Body::Streaming(chunks) => chunks,
        };
        let mut buf = BytesMut::new();
        while let Some(chunk) = chunks.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Buffered(bytes) => write!(f, "Body::Buffered({} bytes)", bytes.len()),
            Body::Streaming(_) => f.write_str("Body::Streaming"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Buffered(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Body::Buffered(Bytes::from(data))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Buffered(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Buffered(Bytes::from_static(text.as_bytes()))
    }
}
