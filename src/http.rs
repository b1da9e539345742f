//! Treat an HTTP GET response body as a readable file.

use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;

use crate::error::{CmdError, Result};

/// Streaming reader over the body of a GET request.
///
/// The response is released as soon as the body is exhausted, on
/// [`close`](Self::close), or on drop, whichever comes first.
pub struct HttpReader {
    url: String,
    response: Option<BufReader<reqwest::blocking::Response>>,
    position: u64,
}

impl HttpReader {
    /// Send the request. Non-success statuses are reported as errors.
    pub fn open(url: &str, timeout: Option<Duration>) -> Result<Self> {
        tracing::debug!(url, "opening url");
        let http_err = |source| CmdError::Http {
            url: url.to_string(),
            source,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(http_err)?;
        let response = client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(http_err)?;
        Ok(Self {
            url: url.to_string(),
            response: Some(BufReader::new(response)),
            position: 0,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn readable(&self) -> bool {
        self.response.is_some()
    }

    pub fn seekable(&self) -> bool {
        false
    }

    /// Always fails: a response body cannot be rewound.
    pub fn seek(&mut self, _pos: io::SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "cannot seek in an HTTP response",
        ))
    }

    /// Bytes consumed so far, or `None` once closed.
    pub fn tell(&self) -> Option<u64> {
        self.response.as_ref().map(|_| self.position)
    }

    /// Read the rest of the body as text and close.
    pub fn read_all(&mut self) -> Result<String> {
        let mut text = String::new();
        self.read_to_string(&mut text).map_err(|source| CmdError::Read {
            name: self.url.clone(),
            source,
        })?;
        self.close();
        Ok(text)
    }

    /// Release the connection. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.response.take().is_some() {
            tracing::debug!(url = %self.url, "closed url");
        }
    }
}

impl Read for HttpReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(response) = self.response.as_mut() else {
            return Ok(0);
        };
        let n = response.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.close();
        }
        self.position += n as u64;
        Ok(n)
    }
}

impl BufRead for HttpReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let exhausted = match self.response.as_mut() {
            Some(response) => response.fill_buf()?.is_empty(),
            None => return Ok(&[]),
        };
        if exhausted {
            self.close();
            return Ok(&[]);
        }
        match self.response.as_mut() {
            Some(response) => response.fill_buf(),
            None => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        if let Some(response) = self.response.as_mut() {
            response.consume(amt);
            self.position += amt as u64;
        }
    }
}

impl Drop for HttpReader {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for HttpReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReader")
            .field("url", &self.url)
            .field("open", &self.response.is_some())
            .field("position", &self.position)
            .finish()
    }
}
