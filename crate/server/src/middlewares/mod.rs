mod correlation_id;

pub(crate) use correlation_id::{CORRELATION_ID_HEADER, TraceRequests};
