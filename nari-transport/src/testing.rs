//! Recording control channel for tests
//!
//! `RecordingChannel` stands in for a headset: it logs every transfer and
//! settle wait into a shared call log and answers with scripted replies
//! (full-frame success by default).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::channel::ControlChannel;
use crate::error::TransportError;
use crate::protocol::FRAME_SIZE;

/// One observed call, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetReport([u8; FRAME_SIZE]),
    GetReport,
    Settle(Duration),
}

/// Scripted channel result
#[derive(Debug, Clone)]
pub enum Reply {
    Count(usize),
    Fail(TransportError),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    set_replies: VecDeque<Reply>,
    get_replies: VecDeque<(Reply, Option<[u8; FRAME_SIZE]>)>,
    overlaps: usize,
}

/// Test double implementing `ControlChannel`
pub struct RecordingChannel {
    state: Arc<Mutex<State>>,
    in_flight: Arc<AtomicBool>,
    hold: Duration,
}

/// Handle for scripting replies and inspecting the call log
#[derive(Clone)]
pub struct ChannelRecorder {
    state: Arc<Mutex<State>>,
    in_flight: Arc<AtomicBool>,
}

impl RecordingChannel {
    pub fn new() -> (Self, ChannelRecorder) {
        let state = Arc::new(Mutex::new(State::default()));
        let in_flight = Arc::new(AtomicBool::new(false));
        let recorder = ChannelRecorder {
            state: Arc::clone(&state),
            in_flight: Arc::clone(&in_flight),
        };
        let channel = Self {
            state,
            in_flight,
            hold: Duration::ZERO,
        };
        (channel, recorder)
    }

    /// Keep each transfer in flight for `hold` to widen race windows
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    fn enter(&self) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.state.lock().overlaps += 1;
        }
        if !self.hold.is_zero() {
            std::thread::sleep(self.hold);
        }
    }

    fn leave(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

impl ControlChannel for RecordingChannel {
    fn set_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        self.enter();
        let reply = {
            let mut state = self.state.lock();
            state.calls.push(Call::SetReport(*frame));
            state.set_replies.pop_front()
        };
        self.leave();

        match reply.unwrap_or(Reply::Count(FRAME_SIZE)) {
            Reply::Count(n) => Ok(n),
            Reply::Fail(e) => Err(e),
        }
    }

    fn get_report(&mut self, buf: &mut [u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        self.enter();
        let reply = {
            let mut state = self.state.lock();
            state.calls.push(Call::GetReport);
            state.get_replies.pop_front()
        };
        self.leave();

        let (reply, bytes) = reply.unwrap_or((Reply::Count(FRAME_SIZE), None));
        if let Some(bytes) = bytes {
            *buf = bytes;
        }
        match reply {
            Reply::Count(n) => Ok(n),
            Reply::Fail(e) => Err(e),
        }
    }
}

impl ChannelRecorder {
    /// Queue the result of the next SET_REPORT
    pub fn push_set_reply(&self, reply: Reply) {
        self.state.lock().set_replies.push_back(reply);
    }

    /// Queue a full status report for the next GET_REPORT
    pub fn push_status(&self, bytes: [u8; FRAME_SIZE]) {
        self.state
            .lock()
            .get_replies
            .push_back((Reply::Count(FRAME_SIZE), Some(bytes)));
    }

    /// Queue the result of the next GET_REPORT without touching the buffer
    pub fn push_get_reply(&self, reply: Reply) {
        self.state.lock().get_replies.push_back((reply, None));
    }

    /// Settle function that logs into the call log instead of sleeping
    pub fn settle_fn(&self) -> impl Fn(Duration) + Send + 'static {
        let state = Arc::clone(&self.state);
        let in_flight = Arc::clone(&self.in_flight);
        move |delay| {
            if in_flight.load(Ordering::SeqCst) {
                state.lock().overlaps += 1;
            }
            state.lock().calls.push(Call::Settle(delay));
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Frames sent with SET_REPORT, in order
    pub fn frames(&self) -> Vec<[u8; FRAME_SIZE]> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::SetReport(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    pub fn settles(&self) -> Vec<Duration> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Settle(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Number of times a transfer started while another was in flight
    pub fn overlaps(&self) -> usize {
        self.state.lock().overlaps
    }
}
