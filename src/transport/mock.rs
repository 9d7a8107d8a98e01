//! Mock transport for testing.
//!
//! [`MockRemote`] records every transaction and answers from a queue of
//! scripted replies. With nothing queued it answers with a success code
//! and no payload, which is also the shape malformed-reply tests want.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ServiceConfig;
use crate::error::{code, AnsError, Result};
use crate::parcel::Parcel;

use super::{RemoteObject, ServiceConnector, TransportError};

/// One recorded transaction request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// The transaction code the proxy issued.
    pub code: u32,
    /// The request parcel as the proxy wrote it.
    pub data: Parcel,
}

#[derive(Debug)]
enum MockReply {
    Reply(Parcel),
    Error(TransportError),
}

/// Mock remote object for testing.
#[derive(Debug, Default)]
pub struct MockRemote {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<MockReply>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply parcel for the next transaction.
    pub fn queue_reply(&self, reply: Parcel) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(MockReply::Reply(reply));
    }

    /// Queue a transport-level failure for the next transaction.
    pub fn queue_error(&self, error: TransportError) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(MockReply::Error(error));
    }

    /// Queue a reply with the given leading result code and no payload.
    pub fn queue_result_code(&self, result: i32) {
        let mut reply = Parcel::new();
        reply.write_i32(result).expect("reply parcel");
        self.queue_reply(reply);
    }

    /// Queue a success reply whose payload is written by `f`.
    pub fn queue_ok_with(&self, f: impl FnOnce(&mut Parcel)) {
        let mut reply = Parcel::new();
        reply.write_i32(code::ERR_OK).expect("reply parcel");
        f(&mut reply);
        self.queue_reply(reply);
    }

    /// Number of transactions seen so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drain and return all recorded requests.
    pub fn take_requests(&self) -> Vec<RecordedRequest> {
        std::mem::take(
            &mut *self
                .requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl RemoteObject for MockRemote {
    fn transact(
        &self,
        code: u32,
        data: &Parcel,
        reply: &mut Parcel,
    ) -> std::result::Result<(), TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                code,
                data: data.clone(),
            });

        let scripted = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match scripted {
            Some(MockReply::Reply(parcel)) => {
                *reply = parcel;
                Ok(())
            }
            Some(MockReply::Error(error)) => Err(error),
            None => {
                let mut parcel = Parcel::new();
                parcel.write_i32(code::ERR_OK).expect("reply parcel");
                *reply = parcel;
                Ok(())
            }
        }
    }
}

/// Mock connector handing out a preset remote object.
pub struct MockConnector {
    remote: Arc<MockRemote>,
    fail: bool,
}

impl MockConnector {
    /// Connector that always yields `remote`.
    pub fn new(remote: Arc<MockRemote>) -> Self {
        Self {
            remote,
            fail: false,
        }
    }

    /// Connector whose `connect` always fails.
    pub fn failing() -> Self {
        Self {
            remote: Arc::new(MockRemote::new()),
            fail: true,
        }
    }
}

impl ServiceConnector for MockConnector {
    fn connect(&self, _service: &ServiceConfig) -> Result<Arc<dyn RemoteObject>> {
        if self.fail {
            return Err(AnsError::ServiceNotConnected);
        }
        Ok(self.remote.clone() as Arc<dyn RemoteObject>)
    }
}
