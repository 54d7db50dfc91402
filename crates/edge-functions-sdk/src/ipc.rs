//! IPC protocol for running a handler as a standalone process.
//!
//! A platform drives the handler binary with a simple length-prefixed JSON
//! protocol over stdin/stdout: a 4-byte big-endian length followed by that
//! many bytes of JSON. Requests arrive on stdin, responses leave on stdout.
//! Logs go to stderr so they never interleave with the protocol stream.
//!
//! # Example
//! ```ignore
//! use edge_functions_sdk::prelude::*;
//!
//! fn handle(req: Request) -> Response {
//!     Response::ok(json!({"path": req.path}))
//! }
//!
//! edge_functions_sdk::handler_loop!(handle);
//! ```

use crate::error::DEFAULT_INTERNAL_MESSAGE;
use crate::{HandlerError, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, ErrorKind, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use tracing_subscriber::EnvFilter;

/// Largest frame accepted from the platform.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Read one frame and decode it. Returns `Ok(None)` on a clean end of input.
pub fn read_frame<T: DeserializeOwned, R: Read>(reader: &mut R) -> Result<Option<T>, HandlerError> {
    // Read length prefix (4 bytes, big-endian)
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(HandlerError::Ipc(format!("Failed to read length prefix: {}", e))),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(HandlerError::Ipc(format!("Frame of {} bytes exceeds limit", len)));
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(|e| HandlerError::Ipc(format!("Failed to read payload: {}", e)))?;

    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|e| HandlerError::Ipc(format!("Failed to parse frame: {}", e)))
}

/// Encode a value and write it as one frame.
pub fn write_frame<T: Serialize, W: Write>(writer: &mut W, value: &T) -> Result<(), HandlerError> {
    let payload = serde_json::to_vec(value)
        .map_err(|e| HandlerError::Ipc(format!("Failed to serialize frame: {}", e)))?;

    let len = u32::try_from(payload.len())
        .map_err(|_| HandlerError::Ipc("Frame too large".into()))?;
    writer
        .write_all(&len.to_be_bytes())
        .map_err(|e| HandlerError::Ipc(format!("Failed to write length: {}", e)))?;
    writer
        .write_all(&payload)
        .map_err(|e| HandlerError::Ipc(format!("Failed to write payload: {}", e)))?;
    writer
        .flush()
        .map_err(|e| HandlerError::Ipc(format!("Failed to flush: {}", e)))?;

    Ok(())
}

/// Serve requests from `reader` until it is exhausted, writing each response
/// to `writer`. Returns the number of requests served.
///
/// A handler panic is answered with the generic internal error body and the
/// loop carries on with the next request.
pub fn serve<R, W, F>(reader: &mut R, writer: &mut W, handler: F) -> Result<usize, HandlerError>
where
    R: Read,
    W: Write,
    F: Fn(Request) -> Response,
{
    let mut served = 0;
    while let Some(req) = read_frame::<Request, _>(reader)? {
        let request_id = req.request_id.clone();
        let response = match panic::catch_unwind(AssertUnwindSafe(|| handler(req))) {
            Ok(response) => response,
            Err(_) => {
                tracing::error!(request_id = %request_id, "Handler panicked");
                Response::internal_error(DEFAULT_INTERNAL_MESSAGE)
            }
        };
        tracing::debug!(request_id = %request_id, status = response.status, "Sending response");
        write_frame(writer, &response)?;
        served += 1;
    }
    Ok(served)
}

/// Serve requests over the process's stdin/stdout.
pub fn serve_stdio<F: Fn(Request) -> Response>(handler: F) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match serve(&mut stdin.lock(), &mut stdout.lock(), handler) {
        Ok(served) => tracing::info!(served, "Input closed, exiting"),
        Err(e) => tracing::error!(error = %e, "IPC failure, exiting"),
    }
}

/// Install a stderr logger honouring `RUST_LOG` (default `info`).
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Convenience macro for running a handler binary.
///
/// Expands to a `main` that installs stderr logging and serves
/// length-prefixed requests from stdin until EOF.
///
/// # Example
/// ```ignore
/// edge_functions_sdk::handler_loop!(hello_function::handle);
/// ```
#[macro_export]
macro_rules! handler_loop {
    ($handler:expr) => {
        fn main() {
            $crate::ipc::init_logging();
            $crate::ipc::serve_stdio($handler);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn frames(requests: &[Request]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        for req in requests {
            write_frame(&mut buf, req).unwrap();
        }
        Cursor::new(buf)
    }

    #[test]
    fn test_frame_layout() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &json!({"a": 1})).unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 7]);
        assert_eq!(&buf[4..], br#"{"a":1}"#);
    }

    #[test]
    fn test_clean_eof_reads_none() {
        let mut empty = Cursor::new(Vec::new());
        assert!(read_frame::<Request, _>(&mut empty).unwrap().is_none());
    }

    #[test]
    fn test_truncated_payload_is_error() {
        let mut input = Cursor::new(vec![0, 0, 0, 10, b'{']);
        assert!(matches!(
            read_frame::<Request, _>(&mut input),
            Err(HandlerError::Ipc(_))
        ));
    }

    #[test]
    fn test_oversized_frame_is_rejected() {
        let len = (MAX_FRAME_LEN as u32 + 1).to_be_bytes();
        let mut input = Cursor::new(len.to_vec());
        assert!(read_frame::<Request, _>(&mut input).is_err());
    }

    #[test]
    fn test_serve_answers_each_request() {
        let mut input = frames(&[
            Request::new("GET", "/one"),
            Request::new("GET", "/two"),
        ]);
        let mut output = Vec::new();

        let served = serve(&mut input, &mut output, |req| Response::ok(json!({"path": req.path}))).unwrap();
        assert_eq!(served, 2);

        let mut output = Cursor::new(output);
        let first: Response = read_frame(&mut output).unwrap().unwrap();
        let second: Response = read_frame(&mut output).unwrap().unwrap();
        assert_eq!(first.body.as_deref(), Some(r#"{"path":"/one"}"#));
        assert_eq!(second.body.as_deref(), Some(r#"{"path":"/two"}"#));
        assert!(read_frame::<Response, _>(&mut output).unwrap().is_none());
    }

    #[test]
    fn test_serve_survives_handler_panic() {
        let mut input = frames(&[
            Request::new("GET", "/boom"),
            Request::new("GET", "/fine"),
        ]);
        let mut output = Vec::new();

        let served = serve(&mut input, &mut output, |req| {
            if req.path == "/boom" {
                panic!("handler bug");
            }
            Response::ok(json!({"path": req.path}))
        })
        .unwrap();
        assert_eq!(served, 2);

        let mut output = Cursor::new(output);
        let first: Response = read_frame(&mut output).unwrap().unwrap();
        assert_eq!(first.status, 500);
        let body: crate::response::ErrorBody = first.body_json().unwrap();
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.status.as_deref(), Some("error"));

        let second: Response = read_frame(&mut output).unwrap().unwrap();
        assert_eq!(second.status, 200);
    }
}
