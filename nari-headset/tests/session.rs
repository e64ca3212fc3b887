//! Session tests against a recording control channel.
//!
//! These run the full session → transport → channel path without hardware.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use nari_headset::{HeadsetError, HeadsetSession, RgbColor, StaticColor};
use nari_transport::testing::{Call, ChannelRecorder, RecordingChannel, Reply};
use nari_transport::{Backend, ControlTransport, TransportDeviceInfo, TransportError};

fn nari_info() -> TransportDeviceInfo {
    TransportDeviceInfo {
        vid: 0x1532,
        pid: 0x051B,
        interface_number: 5,
        interface_protocol: Some(0),
        backend: Backend::Usb,
        device_path: "usb:001:007".into(),
        product_name: None,
    }
}

fn session_with(channel: RecordingChannel, recorder: &ChannelRecorder) -> HeadsetSession {
    let transport = ControlTransport::new(Box::new(channel)).with_settle(recorder.settle_fn());
    HeadsetSession::new(transport, nari_info())
}

fn session() -> (HeadsetSession, ChannelRecorder) {
    let (channel, recorder) = RecordingChannel::new();
    (session_with(channel, &recorder), recorder)
}

#[test]
fn static_color_frame_and_cache() {
    let (session, recorder) = session();

    session.set_static_color(0x10, 0x20, 0x30, None).unwrap();

    let frames = recorder.frames();
    assert_eq!(frames.len(), 1);
    let frame = frames[0];
    assert_eq!(frame.len(), 64);
    assert_eq!(&frame[0..5], &[0xFF, 0x0A, 0x00, 0xFF, 0x04]);
    assert_eq!(&frame[5..9], &[0x12, 0xF1, 0x05, 0x72]);
    assert_eq!(&frame[9..12], &[0x10, 0x20, 0x30]);
    assert!(frame[12..].iter().all(|&b| b == 0));

    assert_eq!(session.get_static_color().as_tuple(), (0x10, 0x20, 0x30));
}

#[test]
fn static_color_with_intensity_unverified_device_behavior() {
    // Byte 12 is sent for compatibility; no confirmed effect on hardware.
    let (session, recorder) = session();
    let payload = StaticColor::from_payload(&[0x01, 0x02, 0x03, 0x09]).unwrap();

    session.apply_static_color(payload).unwrap();

    let frame = recorder.frames()[0];
    assert_eq!(&frame[9..13], &[0x01, 0x02, 0x03, 0x09]);
    assert_eq!(session.get_static_color(), RgbColor::new(1, 2, 3));
}

#[test]
fn effect_none_sends_brightness_zero() {
    let (session, recorder) = session();
    session.set_brightness(200).unwrap();

    session.set_effect_none().unwrap();

    let frame = recorder.frames()[1];
    assert_eq!(&frame[5..10], &[0x12, 0xF1, 0x03, 0x71, 0x00]);
    assert_eq!(session.brightness(), 0);
}

#[test]
fn every_write_waits_the_full_settle_time() {
    let (session, recorder) = session();
    session.set_static_color(1, 1, 1, None).unwrap();
    session.set_effect_none().unwrap();

    assert_eq!(
        recorder.settles(),
        vec![Duration::from_millis(960), Duration::from_millis(960)]
    );
}

#[test]
fn failed_write_leaves_cache_untouched() {
    let (session, recorder) = session();
    session.set_static_color(0xAA, 0xBB, 0xCC, None).unwrap();

    recorder.push_set_reply(Reply::Count(8));
    let err = session.set_static_color(1, 2, 3, None).unwrap_err();
    assert_eq!(
        err,
        HeadsetError::Transport(TransportError::ShortWrite {
            expected: 64,
            actual: 8
        })
    );
    assert_eq!(session.get_static_color().as_tuple(), (0xAA, 0xBB, 0xCC));

    recorder.push_set_reply(Reply::Fail(TransportError::DeviceError("broken pipe".into())));
    let err = session.set_brightness(50).unwrap_err();
    assert!(matches!(
        err,
        HeadsetError::Transport(TransportError::DeviceError(_))
    ));
    assert_eq!(session.brightness(), 0);
}

#[test]
fn session_usable_after_error() {
    let (session, recorder) = session();
    recorder.push_set_reply(Reply::Fail(TransportError::DeviceError("timeout".into())));

    assert!(session.set_static_color(1, 2, 3, None).is_err());
    session.set_static_color(4, 5, 6, None).unwrap();

    assert_eq!(session.get_static_color().as_tuple(), (4, 5, 6));
    // One attempt each, no internal retry
    assert_eq!(recorder.frames().len(), 2);
}

#[test]
fn request_status_stores_snapshot() {
    let (session, recorder) = session();
    assert!(session.last_status().is_none());

    let mut bytes = [0u8; 64];
    bytes[0] = 0x01;
    bytes[10] = 0x5A;
    recorder.push_status(bytes);

    let status = session.request_status().unwrap();
    assert_eq!(status.as_bytes(), &bytes);
    assert_eq!(session.last_status(), Some(status));
    assert_eq!(recorder.calls(), vec![Call::GetReport]);
}

#[test]
fn short_status_read_keeps_previous_snapshot() {
    let (session, recorder) = session();
    let mut bytes = [0u8; 64];
    bytes[0] = 0x01;
    recorder.push_status(bytes);
    session.request_status().unwrap();

    recorder.push_get_reply(Reply::Count(17));
    let err = session.request_status().unwrap_err();

    assert_eq!(
        err,
        HeadsetError::Transport(TransportError::ShortRead {
            expected: 64,
            actual: 17
        })
    );
    assert_eq!(session.last_status().unwrap().as_bytes(), &bytes);
}

#[test]
fn attach_polls_status_once() {
    let (channel, recorder) = RecordingChannel::new();
    let transport = ControlTransport::new(Box::new(channel)).with_settle(recorder.settle_fn());

    let session = HeadsetSession::attach(transport, nari_info());

    assert_eq!(recorder.calls(), vec![Call::GetReport]);
    assert!(session.last_status().is_some());
}

#[test]
fn attach_survives_failed_poll() {
    let (channel, recorder) = RecordingChannel::new();
    recorder.push_get_reply(Reply::Fail(TransportError::DeviceError("stall".into())));
    let transport = ControlTransport::new(Box::new(channel)).with_settle(recorder.settle_fn());

    let session = HeadsetSession::attach(transport, nari_info());

    assert!(session.last_status().is_none());
    session.set_effect_none().unwrap();
}

#[test]
fn concurrent_callers_never_interleave() {
    let (channel, recorder) = RecordingChannel::new();
    let channel = channel.with_hold(Duration::from_millis(2));
    let session = Arc::new(session_with(channel, &recorder));

    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for i in 0..5u8 {
                    match (t + i) % 3 {
                        0 => session.set_static_color(t, i, 0x42, None).unwrap(),
                        1 => session.set_effect_none().unwrap(),
                        _ => {
                            session.request_status().unwrap();
                        }
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(recorder.overlaps(), 0);

    // Each write is immediately followed by its own settle wait
    let calls = recorder.calls();
    for (i, call) in calls.iter().enumerate() {
        if let Call::SetReport(frame) = call {
            assert_eq!(&frame[0..5], &[0xFF, 0x0A, 0x00, 0xFF, 0x04]);
            assert!(matches!(calls.get(i + 1), Some(Call::Settle(_))));
        }
    }
    assert_eq!(calls.len(), 4 * 5 + recorder.frames().len());
}

#[test]
fn color_read_does_not_touch_transport() {
    let (session, recorder) = session();
    let _ = session.get_static_color();
    let _ = session.settings();
    assert!(recorder.calls().is_empty());
}

#[test]
fn model_and_interface_gating() {
    let (session, _recorder) = session();
    assert_eq!(session.model().name(), "Razer Nari Ultimate");
    assert!(session.exposes_attributes());

    let (channel, recorder) = RecordingChannel::new();
    let transport = ControlTransport::new(Box::new(channel)).with_settle(recorder.settle_fn());
    let mut info = nari_info();
    info.interface_protocol = Some(1);
    assert!(!HeadsetSession::new(transport, info).exposes_attributes());
}
