use std::fmt::{self, Debug, Formatter};

/// Where a handler writes its response
pub trait ResponseWriter {
    fn write_status(&mut self, status: u16);
    fn write_body(&mut self, bytes: &[u8]);
}

/// Records the last response written to it.
///
/// [`reset`](ResponseRecorder::reset) keeps the body buffer's capacity, so
/// once the first response has been written, recording the same response
/// again does not allocate.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResponseRecorder {
    status: u16,
    body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            status: 0,
            body: Vec::with_capacity(capacity),
        }
    }

    /// Status of the last response, 0 if nothing was written
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether this is the fixed benchmark response
    pub fn is_success(&self) -> bool {
        self.status == 200 && self.body == b"success"
    }

    #[inline]
    pub fn reset(&mut self) {
        self.status = 0;
        self.body.clear();
    }
}

impl ResponseWriter for ResponseRecorder {
    #[inline]
    fn write_status(&mut self, status: u16) {
        self.status = status;
    }

    #[inline]
    fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}

impl Debug for ResponseRecorder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseRecorder")
            .field("status", &self.status)
            .field("body", &self.body_string())
            .finish()
    }
}

/// What a router writes when no route matches
pub(crate) fn not_found(response: &mut dyn ResponseWriter) {
    response.write_status(404);
    response.write_body(b"404 page not found");
}
